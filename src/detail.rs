//! Node detail resolution for the side panel
//!
//! Answers "what do I show about node X": its topics, its neighbours and the
//! personas it is relevant to. Resolution fails soft: an unknown id yields
//! `None`, unresolved topic ids and dangling neighbours are skipped.

use std::collections::HashSet;

use navigator_types::{Node, NodeType, Persona, Topic};
use serde::Serialize;

use crate::dataset::GraphDataset;

/// Direction of the edge that connects a related node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeDirection {
    /// Selected node -> related node
    Outgoing,
    /// Related node -> selected node
    Incoming,
}

/// Neighbour reached through one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedNode {
    pub node: Node,
    /// Type of the first edge (in declaration order) that linked the pair
    pub edge_type: String,
    pub direction: EdgeDirection,
}

/// Everything the detail panel shows for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub id: String,
    pub title: String,
    pub node_type: NodeType,
    pub topics: Vec<Topic>,
    pub related_nodes: Vec<RelatedNode>,
    pub relevant_personas: Vec<Persona>,
}

impl NodeDetail {
    /// Related nodes without the edge metadata
    pub fn related(&self) -> impl Iterator<Item = &Node> {
        self.related_nodes.iter().map(|r| &r.node)
    }
}

/// Resolve the detail for `node_id`, or `None` if the dataset has no such node
pub fn resolve_detail(dataset: &GraphDataset, node_id: &str, related_limit: usize) -> Option<NodeDetail> {
    let node = dataset.node(node_id)?;
    Some(build_node_detail(node, dataset, related_limit))
}

/// Build the detail for a node known to be in `dataset`
pub fn build_node_detail(node: &Node, dataset: &GraphDataset, related_limit: usize) -> NodeDetail {
    let topics = node
        .topics
        .iter()
        .filter_map(|id| dataset.topic(id))
        .cloned()
        .collect();

    let relevant_personas = dataset
        .personas()
        .iter()
        .filter(|p| node.personas.contains(&p.id))
        .cloned()
        .collect();

    NodeDetail {
        id: node.id.clone(),
        title: node.title.clone(),
        node_type: node.node_type,
        topics,
        related_nodes: related_nodes(node, dataset, related_limit),
        relevant_personas,
    }
}

/// Neighbours in edge declaration order, de-duplicated, capped at `limit`
fn related_nodes(node: &Node, dataset: &GraphDataset, limit: usize) -> Vec<RelatedNode> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut related = Vec::new();

    for edge in dataset.edges() {
        if related.len() >= limit {
            break;
        }

        let (other_id, direction) = if edge.from == node.id {
            (edge.to.as_str(), EdgeDirection::Outgoing)
        } else if edge.to == node.id {
            (edge.from.as_str(), EdgeDirection::Incoming)
        } else {
            continue;
        };

        if other_id == node.id || !seen.insert(other_id) {
            continue;
        }
        let Some(other) = dataset.node(other_id) else {
            continue;
        };

        related.push(RelatedNode {
            node: other.clone(),
            edge_type: edge.edge_type.clone(),
            direction,
        });
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_types::{Edge, GraphData};
    use pretty_assertions::assert_eq;

    fn dataset() -> GraphDataset {
        let mut nodes = vec![
            Node::new("hub", NodeType::Page, "Hub")
                .with_topics(["topic_finance", "topic_unknown"])
                .with_personas(["working_executive", "ghost_persona"]),
            Node::new("topic_finance", NodeType::Topic, "Finance"),
        ];
        let mut edges = vec![
            Edge::new("hub", "topic_finance", "has_topic"),
            Edge::new("hub", "hub", "self"),
            Edge::new("hub", "missing", "links_to"),
        ];
        for i in 0..7 {
            nodes.push(Node::new(format!("p{}", i), NodeType::Page, format!("P{}", i)));
            edges.push(Edge::new(format!("p{}", i), "hub", "links_to"));
        }
        // Second edge to an already-related node
        edges.push(Edge::new("topic_finance", "hub", "mentions"));

        GraphDataset::new(GraphData {
            nodes,
            edges,
            topics: vec![Topic::new("topic_finance", "Finance", 67, 0.9)],
            personas: vec![
                Persona::new("prospective_student", "Prospective Student"),
                Persona::new("working_executive", "Working Executive"),
            ],
        })
    }

    #[test]
    fn test_unknown_node_is_none() {
        assert!(resolve_detail(&dataset(), "does_not_exist", 5).is_none());
    }

    #[test]
    fn test_topics_skip_unresolved() {
        let detail = resolve_detail(&dataset(), "hub", 5).unwrap();
        let topic_ids: Vec<_> = detail.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(topic_ids, vec!["topic_finance"]);
    }

    #[test]
    fn test_related_nodes_capped_in_declaration_order() {
        let detail = resolve_detail(&dataset(), "hub", 5).unwrap();
        let related: Vec<_> = detail.related().map(|n| n.id.as_str()).collect();

        // Self loop and dangling edge skipped, cap at 5
        assert_eq!(related, vec!["topic_finance", "p0", "p1", "p2", "p3"]);
        assert_eq!(detail.related_nodes[0].direction, EdgeDirection::Outgoing);
        assert_eq!(detail.related_nodes[1].direction, EdgeDirection::Incoming);
        assert_eq!(detail.related_nodes[1].edge_type, "links_to");
    }

    #[test]
    fn test_related_nodes_are_deduplicated() {
        let detail = resolve_detail(&dataset(), "topic_finance", 5).unwrap();
        let related: Vec<_> = detail.related().map(|n| n.id.as_str()).collect();
        assert_eq!(related, vec!["hub"]);
        assert_eq!(detail.related_nodes[0].edge_type, "has_topic");
    }

    #[test]
    fn test_relevant_personas_follow_dataset_order() {
        let detail = resolve_detail(&dataset(), "hub", 5).unwrap();
        let personas: Vec<_> = detail.relevant_personas.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(personas, vec!["working_executive"]);
    }

    #[test]
    fn test_zero_limit() {
        let detail = resolve_detail(&dataset(), "hub", 0).unwrap();
        assert!(detail.related_nodes.is_empty());
        assert_eq!(detail.title, "Hub");
        assert_eq!(detail.node_type, NodeType::Page);
    }
}
