//! Render adapter - maps navigator state to a renderer-agnostic draw-list
//!
//! The draw-list is plain data in world coordinates. Backends (the egui
//! painter in `navigator-graph`, the CLI's JSON dump) only transform and
//! paint it; every highlighting decision is made here.
//!
//! Nodes without a layout position are left out, along with every edge that
//! touches them.

use std::collections::HashSet;

use navigator_types::{Node, NodeType};
use serde::Serialize;

use crate::config::RenderConfig;
use crate::dataset::GraphDataset;
use crate::filter::VisibleGraph;
use crate::journey::JourneyPlayer;
use crate::layout::{Bounds, Layout, Position};

/// Importance assumed for topic nodes without a topic record
const DEFAULT_IMPORTANCE: f32 = 0.5;

/// How a node is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FillState {
    /// Current journey step while playing
    Active,
    /// Somewhere on the selected persona's journey
    OnPath,
    Default,
}

/// How an edge is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrokeState {
    /// The edge just traversed by the journey
    Journey,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawNode {
    pub id: String,
    pub label: String,
    pub node_type: NodeType,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill: FillState,
    pub selected: bool,
}

impl DrawNode {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawEdge {
    pub from: String,
    pub to: String,
    pub from_pos: Position,
    pub to_pos: Position,
    pub edge_type: String,
    pub weight: f32,
    pub stroke: StrokeState,
}

/// Ordered primitives for one frame. Edges are listed first and are meant
/// to be painted below the nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub edges: Vec<DrawEdge>,
    pub nodes: Vec<DrawNode>,
    /// Color tag of the selected persona, used for journey highlights
    pub accent_color: Option<String>,
    /// World bounds of the drawn nodes
    pub bounds: Option<Bounds>,
}

impl DrawList {
    pub fn node(&self, id: &str) -> Option<&DrawNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Per-frame options not carried by the journey player
#[derive(Debug, Clone, Default)]
pub struct RenderOptions<'a> {
    /// Node drawn with the selection ring
    pub selected_node: Option<&'a str>,
    /// Overrides the persona color tag
    pub accent_color: Option<&'a str>,
}

/// Draw radius for a node
///
/// Topic nodes scale linearly with their topic's importance between
/// `min_size_scale` and `max_size_scale`.
pub fn node_radius(node: &Node, dataset: &GraphDataset, config: &RenderConfig) -> f32 {
    match node.node_type {
        NodeType::Page => config.page_radius,
        NodeType::Section => config.section_radius,
        NodeType::Topic => {
            let importance = dataset
                .topic(&node.id)
                .map(|t| t.importance)
                .unwrap_or(DEFAULT_IMPORTANCE)
                .clamp(0.0, 1.0);
            let scale =
                config.min_size_scale + (config.max_size_scale - config.min_size_scale) * importance;
            config.topic_radius * scale
        }
    }
}

pub struct DrawListBuilder<'a> {
    dataset: &'a GraphDataset,
    layout: &'a Layout,
    config: &'a RenderConfig,
}

impl<'a> DrawListBuilder<'a> {
    pub fn new(dataset: &'a GraphDataset, layout: &'a Layout, config: &'a RenderConfig) -> Self {
        Self {
            dataset,
            layout,
            config,
        }
    }

    /// Build the draw-list for the visible subgraph
    pub fn build(
        &self,
        visible: &VisibleGraph<'_>,
        journey: &JourneyPlayer,
        opts: &RenderOptions<'_>,
    ) -> DrawList {
        let mut drawn: HashSet<&str> = HashSet::new();
        let mut nodes = Vec::with_capacity(visible.nodes.len());

        for node in &visible.nodes {
            let Some(pos) = self.layout.get(&node.id) else {
                tracing::trace!(node_id = %node.id, "no layout position, node omitted");
                continue;
            };
            if !drawn.insert(node.id.as_str()) {
                continue;
            }

            let fill = if journey.is_node_active(&node.id) {
                FillState::Active
            } else if journey.is_node_in_journey(&node.id) {
                FillState::OnPath
            } else {
                FillState::Default
            };

            nodes.push(DrawNode {
                id: node.id.clone(),
                label: node.title.clone(),
                node_type: node.node_type,
                x: pos.x,
                y: pos.y,
                radius: node_radius(node, self.dataset, self.config),
                fill,
                selected: opts.selected_node == Some(node.id.as_str()),
            });
        }

        let mut edges = Vec::with_capacity(visible.edges.len());
        for edge in &visible.edges {
            if !drawn.contains(edge.from.as_str()) || !drawn.contains(edge.to.as_str()) {
                tracing::trace!(from = %edge.from, to = %edge.to, "endpoint not drawn, edge omitted");
                continue;
            }
            let (Some(from_pos), Some(to_pos)) = (self.layout.get(&edge.from), self.layout.get(&edge.to))
            else {
                continue;
            };

            let stroke = if journey.is_edge_on_journey(edge) {
                StrokeState::Journey
            } else {
                StrokeState::Default
            };

            edges.push(DrawEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                from_pos,
                to_pos,
                edge_type: edge.edge_type.clone(),
                weight: edge.weight,
                stroke,
            });
        }

        let accent_color = opts.accent_color.map(str::to_string).or_else(|| {
            journey
                .persona_id()
                .and_then(|id| self.dataset.persona(id))
                .map(|p| p.color_tag.clone())
                .filter(|c| !c.is_empty())
        });

        let bounds = Bounds::enclosing(nodes.iter().map(DrawNode::position));

        DrawList {
            edges,
            nodes,
            accent_color,
            bounds,
        }
    }
}
