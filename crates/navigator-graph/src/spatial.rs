//! Spatial index for pointer hit testing
//!
//! Uses an R-tree (`rstar`) over the drawn nodes, in world coordinates.
//! Rebuilt whenever the draw-list changes shape (filter, view mode).

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use semantic_navigator::DrawList;

/// One drawn node, as a circle
#[derive(Debug, Clone)]
pub struct SpatialNode {
    pub id: String,
    pub center: [f32; 2],
    pub radius: f32,
}

impl SpatialNode {
    pub fn new(id: impl Into<String>, center: [f32; 2], radius: f32) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
        }
    }

    /// Distance from `point` to the circle's edge, zero inside
    fn edge_distance(&self, point: [f32; 2]) -> f32 {
        let dx = point[0] - self.center[0];
        let dy = point[1] - self.center[1];
        ((dx * dx + dy * dy).sqrt() - self.radius).max(0.0)
    }
}

impl RTreeObject for SpatialNode {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.center[0] - self.radius, self.center[1] - self.radius],
            [self.center[0] + self.radius, self.center[1] + self.radius],
        )
    }
}

impl PointDistance for SpatialNode {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let d = self.edge_distance(*point);
        d * d
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.edge_distance(*point) <= 0.0
    }
}

#[derive(Clone)]
pub struct SpatialIndex {
    tree: RTree<SpatialNode>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("count", &self.tree.size())
            .finish_non_exhaustive()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn from_draw_list(list: &DrawList) -> Self {
        let nodes = list
            .nodes
            .iter()
            .map(|n| SpatialNode::new(n.id.clone(), [n.x, n.y], n.radius))
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Closest node whose edge is within `threshold` of `point`
    pub fn hit_test(&self, point: [f32; 2], threshold: f32) -> Option<&SpatialNode> {
        let search = AABB::from_corners(
            [point[0] - threshold, point[1] - threshold],
            [point[0] + threshold, point[1] + threshold],
        );
        self.tree
            .locate_in_envelope_intersecting(&search)
            .map(|node| (node, node.edge_distance(point)))
            .filter(|(_, d)| *d <= threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
