//! Immutable, indexed graph dataset
//!
//! `GraphDataset` wraps the wire-level `GraphData` with id lookups. It is
//! built once when a navigator is constructed and never mutated afterwards.
//!
//! Loading does NOT reject inconsistent data: dangling edges, unknown topic
//! references and journeys through missing nodes are all tolerated by the
//! engine. `validate()` reports them so the host can log or surface them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use navigator_types::{Edge, GraphData, Node, Persona, Topic};

use crate::error::DatasetError;

/// Indexed, read-only view over nodes, edges, topics and personas
#[derive(Debug, Clone, Default)]
pub struct GraphDataset {
    data: GraphData,
    node_index: HashMap<String, usize>,
    topic_index: HashMap<String, usize>,
    persona_index: HashMap<String, usize>,
}

impl GraphDataset {
    /// Index a dataset. On duplicate ids the first declaration wins.
    pub fn new(data: GraphData) -> Self {
        let node_index = first_index_by_id(data.nodes.iter().map(|n| n.id.as_str()));
        let topic_index = first_index_by_id(data.topics.iter().map(|t| t.id.as_str()));
        let persona_index = first_index_by_id(data.personas.iter().map(|p| p.id.as_str()));

        Self {
            data,
            node_index,
            topic_index,
            persona_index,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let data: GraphData = serde_json::from_str(json)?;
        Ok(Self::new(data))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, DatasetError> {
        let data: GraphData = serde_yaml::from_str(yaml)?;
        Ok(Self::new(data))
    }

    /// Read a JSON dataset from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            nodes = dataset.nodes().len(),
            edges = dataset.edges().len(),
            "loaded graph dataset"
        );
        Ok(dataset)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.data.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.data.edges
    }

    pub fn topics(&self) -> &[Topic] {
        &self.data.topics
    }

    pub fn personas(&self) -> &[Persona] {
        &self.data.personas
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.data.nodes[i])
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topic_index.get(id).map(|&i| &self.data.topics[i])
    }

    pub fn persona(&self, id: &str) -> Option<&Persona> {
        self.persona_index.get(id).map(|&i| &self.data.personas[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Borrow the underlying payload
    pub fn data(&self) -> &GraphData {
        &self.data
    }

    /// Collect every inconsistency the engine will tolerate at runtime
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut seen = HashSet::new();
        for node in &self.data.nodes {
            if !seen.insert(node.id.as_str()) {
                report.duplicate_node_ids.push(node.id.clone());
            }
            for topic_id in &node.topics {
                if self.topic(topic_id).is_none() {
                    report.unresolved_topics.push(UnresolvedTopic {
                        node_id: node.id.clone(),
                        topic_id: topic_id.clone(),
                    });
                }
            }
        }

        for (index, edge) in self.data.edges.iter().enumerate() {
            let missing_from = !self.contains_node(&edge.from);
            let missing_to = !self.contains_node(&edge.to);
            if missing_from || missing_to {
                report.dangling_edges.push(DanglingEdge {
                    index,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing_from,
                    missing_to,
                });
            }
        }

        for persona in &self.data.personas {
            for (step, node_id) in persona.journey.iter().enumerate() {
                if !self.contains_node(node_id) {
                    report.unknown_journey_nodes.push(UnknownJourneyNode {
                        persona_id: persona.id.clone(),
                        step,
                        node_id: node_id.clone(),
                    });
                }
            }
        }

        report
    }
}

impl From<GraphData> for GraphDataset {
    fn from(data: GraphData) -> Self {
        Self::new(data)
    }
}

fn first_index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        index.entry(id.to_string()).or_insert(i);
    }
    index
}

// =============================================================================
// VALIDATION REPORT
// =============================================================================

/// Non-fatal dataset findings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub duplicate_node_ids: Vec<String>,
    pub dangling_edges: Vec<DanglingEdge>,
    pub unresolved_topics: Vec<UnresolvedTopic>,
    pub unknown_journey_nodes: Vec<UnknownJourneyNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DanglingEdge {
    /// Position of the edge in declaration order
    pub index: usize,
    pub from: String,
    pub to: String,
    pub missing_from: bool,
    pub missing_to: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedTopic {
    pub node_id: String,
    pub topic_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownJourneyNode {
    pub persona_id: String,
    pub step: usize,
    pub node_id: String,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn issue_count(&self) -> usize {
        self.duplicate_node_ids.len()
            + self.dangling_edges.len()
            + self.unresolved_topics.len()
            + self.unknown_journey_nodes.len()
    }

    /// Emit one warning per finding
    pub fn log(&self) {
        for id in &self.duplicate_node_ids {
            tracing::warn!(node_id = %id, "duplicate node id, first declaration wins");
        }
        for edge in &self.dangling_edges {
            tracing::warn!(
                index = edge.index,
                from = %edge.from,
                to = %edge.to,
                "edge references a node that is not in the dataset"
            );
        }
        for topic in &self.unresolved_topics {
            tracing::warn!(
                node_id = %topic.node_id,
                topic_id = %topic.topic_id,
                "node references an undeclared topic"
            );
        }
        for step in &self.unknown_journey_nodes {
            tracing::warn!(
                persona_id = %step.persona_id,
                step = step.step,
                node_id = %step.node_id,
                "journey step references a node that is not in the dataset"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_types::NodeType;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn small_dataset() -> GraphDataset {
        GraphDataset::new(GraphData {
            nodes: vec![
                Node::new("page_mba", NodeType::Page, "MBA").with_topics(["topic_finance", "topic_ghost"]),
                Node::new("topic_finance", NodeType::Topic, "Finance"),
                Node::new("page_mba", NodeType::Page, "MBA (duplicate)"),
            ],
            edges: vec![
                Edge::new("page_mba", "topic_finance", "has_topic"),
                Edge::new("page_mba", "page_missing", "links_to"),
            ],
            topics: vec![Topic::new("topic_finance", "Finance", 67, 0.9)],
            personas: vec![Persona::new("student", "Student").with_journey(["page_mba", "page_gone"])],
        })
    }

    #[test]
    fn test_lookup_first_declaration_wins() {
        let dataset = small_dataset();
        assert_eq!(dataset.node("page_mba").unwrap().title, "MBA");
        assert!(dataset.topic("topic_finance").is_some());
        assert!(dataset.persona("student").is_some());
        assert!(dataset.node("nope").is_none());
    }

    #[test]
    fn test_validate_reports_every_issue_kind() {
        let report = small_dataset().validate();

        assert_eq!(report.duplicate_node_ids, vec!["page_mba".to_string()]);
        assert_eq!(report.dangling_edges.len(), 1);
        assert_eq!(report.dangling_edges[0].index, 1);
        assert!(!report.dangling_edges[0].missing_from);
        assert!(report.dangling_edges[0].missing_to);
        assert_eq!(
            report.unresolved_topics,
            vec![UnresolvedTopic {
                node_id: "page_mba".to_string(),
                topic_id: "topic_ghost".to_string(),
            }]
        );
        assert_eq!(report.unknown_journey_nodes[0].step, 1);
        assert_eq!(report.issue_count(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_dataset_is_clean() {
        let report = GraphDataset::default().validate();
        assert!(report.is_clean());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
nodes:
  - id: page_alumni
    type: Page
    title: Alumni
topics: []
"#;
        let dataset = GraphDataset::from_yaml_str(yaml).unwrap();
        assert_eq!(dataset.nodes().len(), 1);
        assert!(dataset.edges().is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": "a", "type": "Section", "title": "A"}}]}}"#
        )
        .unwrap();

        let dataset = GraphDataset::from_json_file(file.path()).unwrap();
        assert_eq!(dataset.node("a").unwrap().node_type, NodeType::Section);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = GraphDataset::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }
}
