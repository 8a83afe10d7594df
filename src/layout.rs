//! Layout engine - deterministic node placement
//!
//! Two placements are computed once per dataset:
//!
//! - **Radial** (semantic view): node `i` of `N` sits at angle `i / N * 2π`.
//!   Pages and Sections use ring radius `R`, Topics sit on the inner ring
//!   `R * topic_radius_factor`. A bounded jitter in `[-J, +J]` per axis keeps
//!   same-angle nodes apart.
//! - **Tiered** (traditional view): one row per node type, each row centered
//!   on `x = 0`.
//!
//! Jitter comes from an injected RNG (`StdRng` seeded from config by default)
//! so the same dataset always lays out the same way.

use std::collections::HashMap;
use std::f32::consts::TAU;

use navigator_types::{Node, NodeType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::LayoutConfig;

/// Placement of one node in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned world bounds of a layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Smallest box holding every point, `None` for no points
    pub fn enclosing(points: impl IntoIterator<Item = Position>) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for pos in iter {
            bounds.min_x = bounds.min_x.min(pos.x);
            bounds.min_y = bounds.min_y.min(pos.y);
            bounds.max_x = bounds.max_x.max(pos.x);
            bounds.max_y = bounds.max_y.max(pos.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Node id -> position map
///
/// Entries are only ever added. An id that already has a position keeps it.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: HashMap<String, Position>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node_id: &str) -> Option<Position> {
        self.positions.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.positions.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
        self.positions.iter().map(|(id, pos)| (id.as_str(), *pos))
    }

    /// Bounding box of all positions, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.positions.values().copied())
    }

    /// Insert unless the id is already placed. Returns true when inserted.
    fn place(&mut self, node_id: &str, position: Position) -> bool {
        if self.positions.contains_key(node_id) {
            return false;
        }
        self.positions.insert(node_id.to_string(), position);
        true
    }
}

// =============================================================================
// LAYOUT ENGINE
// =============================================================================

pub struct LayoutEngine<R = StdRng> {
    config: LayoutConfig,
    rng: R,
}

impl LayoutEngine<StdRng> {
    /// Engine whose jitter generator is seeded from `config.seed`
    pub fn new(config: &LayoutConfig) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> LayoutEngine<R> {
    /// Engine with a caller-supplied jitter generator
    pub fn with_rng(config: &LayoutConfig, rng: R) -> Self {
        Self {
            config: config.clone(),
            rng,
        }
    }

    /// Radial placement for every node
    pub fn compute_layout(&mut self, nodes: &[Node]) -> Layout {
        let mut layout = Layout::new();
        let placed = self.extend(&mut layout, nodes);
        tracing::debug!(nodes = nodes.len(), placed, "computed radial layout");
        layout
    }

    /// Place nodes that have no position yet; existing positions are untouched.
    ///
    /// Angles are taken from each node's index in `nodes`, so a grown dataset
    /// slots new ids into the ring without moving old ones. Returns the number
    /// of nodes placed.
    pub fn extend(&mut self, layout: &mut Layout, nodes: &[Node]) -> usize {
        let total = nodes.len();
        let mut placed = 0;

        for (i, node) in nodes.iter().enumerate() {
            if layout.contains(&node.id) {
                continue;
            }
            let position = self.radial_position(i, total, node.node_type);
            if layout.place(&node.id, position) {
                placed += 1;
            }
        }

        placed
    }

    fn radial_position(&mut self, index: usize, total: usize, node_type: NodeType) -> Position {
        let angle = (index as f32 / total.max(1) as f32) * TAU;
        let radius = match node_type {
            NodeType::Topic => self.config.radius * self.config.topic_radius_factor,
            NodeType::Page | NodeType::Section => self.config.radius,
        };
        let (jx, jy) = self.jitter();
        Position::new(angle.cos() * radius + jx, angle.sin() * radius + jy)
    }

    fn jitter(&mut self) -> (f32, f32) {
        let j = self.config.jitter;
        if !(j > 0.0 && (2.0 * j).is_finite()) {
            return (0.0, 0.0);
        }
        (self.rng.gen_range(-j..=j), self.rng.gen_range(-j..=j))
    }

    /// Tiered placement: Pages, then Sections, then Topics, one row each
    pub fn compute_tiered(&self, nodes: &[Node]) -> Layout {
        let mut layout = Layout::new();

        for (tier, node_type) in NodeType::all().iter().enumerate() {
            let row: Vec<&Node> = nodes.iter().filter(|n| n.node_type == *node_type).collect();
            if row.is_empty() {
                continue;
            }

            let y = tier as f32 * self.config.tier_spacing;
            let total_width = (row.len() - 1) as f32 * self.config.column_spacing;
            let start_x = -total_width / 2.0;

            for (i, node) in row.iter().enumerate() {
                let x = start_x + i as f32 * self.config.column_spacing;
                layout.place(&node.id, Position::new(x, y));
            }
        }

        tracing::debug!(nodes = nodes.len(), "computed tiered layout");
        layout
    }
}
