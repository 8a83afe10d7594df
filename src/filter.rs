//! Topic filter - derives the visible subgraph from a topic selection
//!
//! Rules:
//! - Empty selection: every node is visible.
//! - Otherwise a node is visible if any of its topics is selected, or if it is
//!   itself a Topic node whose id is selected.
//! - An edge is visible only when BOTH endpoints are visible.
//!
//! Results keep dataset declaration order.

use std::collections::{BTreeSet, HashSet};

use navigator_types::{Edge, Node};

/// Selected topic ids
///
/// Toggling is a symmetric difference on the set, so toggling the same id
/// twice always restores the previous selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSelection {
    topics: BTreeSet<String>,
}

impl TopicSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection after toggling `topic_id`
    pub fn toggled(&self, topic_id: &str) -> Self {
        let mut next = self.clone();
        next.toggle(topic_id);
        next
    }

    /// Add the id if absent, remove it if present. Returns true when the id
    /// is selected afterwards.
    pub fn toggle(&mut self, topic_id: &str) -> bool {
        if self.topics.remove(topic_id) {
            false
        } else {
            self.topics.insert(topic_id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.topics.clear();
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.topics.contains(topic_id)
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.topics
    }
}

impl<S: Into<String>> FromIterator<S> for TopicSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            topics: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// True when `node` passes the topic filter
pub fn node_matches(node: &Node, selection: &TopicSelection) -> bool {
    if selection.is_empty() {
        return true;
    }
    if node.is_topic() && selection.contains(&node.id) {
        return true;
    }
    node.topics.iter().any(|t| selection.contains(t))
}

/// Nodes that pass the topic filter, in declaration order
pub fn visible_nodes<'a>(nodes: &'a [Node], selection: &TopicSelection) -> Vec<&'a Node> {
    nodes.iter().filter(|n| node_matches(n, selection)).collect()
}

/// Edges whose endpoints are both in `visible`, in declaration order
pub fn visible_edges<'a>(edges: &'a [Edge], visible: &[&Node]) -> Vec<&'a Edge> {
    let ids: HashSet<&str> = visible.iter().map(|n| n.id.as_str()).collect();
    edges
        .iter()
        .filter(|e| ids.contains(e.from.as_str()) && ids.contains(e.to.as_str()))
        .collect()
}

/// Visible node ids as a set, for membership checks
pub fn visible_node_ids<'a>(visible: &[&'a Node]) -> HashSet<&'a str> {
    visible.iter().map(|n| n.id.as_str()).collect()
}

/// Visible subgraph for one selection, borrowed from the dataset
#[derive(Debug, Clone, Default)]
pub struct VisibleGraph<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<&'a Edge>,
}

impl<'a> VisibleGraph<'a> {
    pub fn compute(nodes: &'a [Node], edges: &'a [Edge], selection: &TopicSelection) -> Self {
        let nodes = visible_nodes(nodes, selection);
        let edges = visible_edges(edges, &nodes);
        Self { nodes, edges }
    }

    pub fn node_ids(&self) -> HashSet<&'a str> {
        visible_node_ids(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_types::NodeType;
    use pretty_assertions::assert_eq;

    fn finance_nodes() -> Vec<Node> {
        vec![
            Node::new("topic_finance", NodeType::Topic, "Finance"),
            Node::new("page_mba", NodeType::Page, "MBA")
                .with_topics(["topic_finance", "topic_leadership"]),
            Node::new("page_alumni", NodeType::Page, "Alumni"),
            Node::new("topic_leadership", NodeType::Topic, "Leadership"),
        ]
    }

    fn ids<'a>(nodes: &[&'a Node]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_empty_selection_shows_everything() {
        let nodes = finance_nodes();
        let visible = visible_nodes(&nodes, &TopicSelection::new());
        assert_eq!(visible.len(), nodes.len());
    }

    #[test]
    fn test_topic_selection_matches_tagged_nodes_and_topic_itself() {
        let nodes = finance_nodes();
        let selection: TopicSelection = ["topic_finance"].into_iter().collect();

        let visible = visible_nodes(&nodes, &selection);
        assert_eq!(ids(&visible), vec!["topic_finance", "page_mba"]);
    }

    #[test]
    fn test_topic_node_not_selected_by_other_topic() {
        let nodes = finance_nodes();
        let selection: TopicSelection = ["topic_finance"].into_iter().collect();

        let visible = visible_nodes(&nodes, &selection);
        assert!(!ids(&visible).contains(&"topic_leadership"));
    }

    #[test]
    fn test_edges_need_both_endpoints() {
        let nodes = finance_nodes();
        let edges = vec![
            Edge::new("page_mba", "topic_finance", "has_topic"),
            Edge::new("page_mba", "page_alumni", "links_to"),
            Edge::new("page_alumni", "page_mba", "links_to"),
        ];
        let selection: TopicSelection = ["topic_finance"].into_iter().collect();

        let visible = visible_nodes(&nodes, &selection);
        let edges = visible_edges(&edges, &visible);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, "topic_finance");
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut selection: TopicSelection = ["a", "b"].into_iter().collect();
        let before = selection.clone();

        assert!(selection.toggle("c"));
        assert!(!selection.toggle("c"));
        assert_eq!(selection, before);

        assert!(!selection.toggle("a"));
        assert!(selection.toggle("a"));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_visible_graph_matches_free_functions() {
        let nodes = finance_nodes();
        let edges = vec![
            Edge::new("page_mba", "topic_finance", "has_topic"),
            Edge::new("page_alumni", "page_mba", "links_to"),
        ];
        let selection: TopicSelection = ["topic_finance"].into_iter().collect();

        let graph = VisibleGraph::compute(&nodes, &edges, &selection);
        assert_eq!(ids(&graph.nodes), vec!["topic_finance", "page_mba"]);
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.node_ids().contains("page_mba"));
    }

    #[test]
    fn test_clear() {
        let mut selection: TopicSelection = ["a"].into_iter().collect();
        selection.clear();
        assert!(selection.is_empty());
    }
}
