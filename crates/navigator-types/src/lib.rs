//! Shared dataset types for the semantic navigator
//!
//! This crate is the SINGLE SOURCE OF TRUTH for the shape of a graph dataset
//! as it crosses the input boundary (knowledge-graph export -> navigator).
//!
//! ## Boundary
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  KG export       │  JSON   │  Navigator core  │
//! │  (pipeline)      │ ──────► │  (layout/filter) │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Ids are plain strings, unique per kind
//! 2. Set-valued attributes are `BTreeSet` so iteration order is stable
//! 3. Optional collections default to empty when absent from the payload

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type NodeId = String;
pub type TopicId = String;
pub type PersonaId = String;

// ============================================================================
// NODES
// ============================================================================

/// Kind of graph entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    #[serde(alias = "page", alias = "PAGE")]
    Page,
    #[serde(alias = "topic", alias = "TOPIC")]
    Topic,
    #[serde(alias = "section", alias = "SECTION")]
    Section,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Page => "Page",
            NodeType::Topic => "Topic",
            NodeType::Section => "Section",
        }
    }

    pub fn all() -> &'static [NodeType] {
        &[NodeType::Page, NodeType::Section, NodeType::Topic]
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "page" => Ok(NodeType::Page),
            "topic" => Ok(NodeType::Topic),
            "section" => Ok(NodeType::Section),
            _ => Err(UnknownNodeType(s.to_string())),
        }
    }
}

/// Returned when a node type string is not Page, Topic or Section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeType(pub String);

impl fmt::Display for UnknownNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node type: {}", self.0)
    }
}

impl std::error::Error for UnknownNodeType {}

/// A single graph entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub title: String,
    #[serde(default)]
    pub topics: BTreeSet<TopicId>,
    #[serde(default)]
    pub personas: BTreeSet<PersonaId>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            title: title.into(),
            topics: BTreeSet::new(),
            personas: BTreeSet::new(),
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_personas<I, S>(mut self, personas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.personas = personas.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_topic(&self) -> bool {
        self.node_type == NodeType::Topic
    }
}

// ============================================================================
// EDGES
// ============================================================================

/// Directed, typed, weighted relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(alias = "source")]
    pub from: NodeId,
    #[serde(alias = "target")]
    pub to: NodeId,
    #[serde(rename = "type", default = "default_edge_type")]
    pub edge_type: String,
    #[serde(default = "default_edge_weight")]
    pub weight: f32,
}

fn default_edge_type() -> String {
    "related".to_string()
}

fn default_edge_weight() -> f32 {
    1.0
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, edge_type: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: edge_type.into(),
            weight: default_edge_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// True when either endpoint is `node_id`
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }

    /// The endpoint opposite `node_id`, if the edge touches it
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.from == node_id {
            Some(&self.to)
        } else if self.to == node_id {
            Some(&self.from)
        } else {
            None
        }
    }
}

// ============================================================================
// TOPICS & PERSONAS
// ============================================================================

/// Selectable filter key and node-detail lookup entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub importance: f32,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, frequency: u32, importance: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frequency,
            importance,
        }
    }
}

/// Simulated visitor with a fixed path through the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display colour hint, usually `#rrggbb`
    #[serde(default, alias = "color", alias = "colorTag")]
    pub color_tag: String,
    #[serde(default)]
    pub journey: Vec<NodeId>,
}

impl Persona {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            color_tag: String::new(),
            journey: Vec::new(),
        }
    }

    pub fn with_journey<I, S>(mut self, journey: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.journey = journey.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_color(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = color_tag.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ============================================================================
// DATASET PAYLOAD
// ============================================================================

/// Dataset as handed over by the knowledge-graph export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub personas: Vec<Persona>,
}
