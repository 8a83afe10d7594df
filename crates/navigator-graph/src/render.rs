//! Rendering - paints a `DrawList` with `egui::Painter`
//!
//! All positions in the draw-list are world coordinates; the camera maps them
//! to the screen. Edges go first so nodes sit on top of them.

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use semantic_navigator::{DrawEdge, DrawList, DrawNode, StrokeState};

use crate::camera::Camera2D;
use crate::colors::{
    accent_color, edge_color, edge_width, label_text_color, node_fill, selection_ring_color,
};

// =============================================================================
// GRAPH PAINTER
// =============================================================================

pub struct GraphPainter {
    /// Labels are hidden below this zoom level
    pub label_min_zoom: f32,
    /// Draw arrow heads on directed edges
    pub arrows: bool,
}

impl Default for GraphPainter {
    fn default() -> Self {
        Self {
            label_min_zoom: 0.6,
            arrows: true,
        }
    }
}

impl GraphPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the whole draw-list
    pub fn paint(
        &self,
        painter: &egui::Painter,
        list: &DrawList,
        camera: &Camera2D,
        screen_rect: Rect,
        hovered: Option<&str>,
    ) {
        let accent = accent_color(list.accent_color.as_deref());
        let visible = camera.visible_bounds(screen_rect).expand(40.0);

        // Journey edges last so they stay on top of plain edges
        let (journey, plain): (Vec<&DrawEdge>, Vec<&DrawEdge>) = list
            .edges
            .iter()
            .partition(|e| e.stroke == StrokeState::Journey);
        for edge in plain.into_iter().chain(journey) {
            let from = Pos2::new(edge.from_pos.x, edge.from_pos.y);
            let to = Pos2::new(edge.to_pos.x, edge.to_pos.y);
            if !visible.intersects(Rect::from_two_pos(from, to)) {
                continue;
            }
            self.paint_edge(painter, edge, list, camera, screen_rect, accent);
        }

        for node in &list.nodes {
            if !visible.contains(Pos2::new(node.x, node.y)) {
                continue;
            }
            let is_hovered = hovered == Some(node.id.as_str());
            self.paint_node(painter, node, camera, screen_rect, accent, is_hovered);
        }
    }

    fn paint_edge(
        &self,
        painter: &egui::Painter,
        edge: &DrawEdge,
        list: &DrawList,
        camera: &Camera2D,
        screen_rect: Rect,
        accent: Color32,
    ) {
        let zoom = camera.zoom;
        let from = camera.world_to_screen(Pos2::new(edge.from_pos.x, edge.from_pos.y), screen_rect);
        let to = camera.world_to_screen(Pos2::new(edge.to_pos.x, edge.to_pos.y), screen_rect);
        let color = edge_color(edge.stroke, accent);
        let width = (edge_width(edge.stroke, edge.weight) * zoom).max(0.5);

        painter.line_segment([from, to], Stroke::new(width, color));

        if self.arrows && zoom >= self.label_min_zoom {
            let target_radius = list.node(&edge.to).map(|n| n.radius).unwrap_or(0.0) * zoom;
            paint_arrow_head(painter, from, to, target_radius, 6.0 * zoom, color);
        }
    }

    fn paint_node(
        &self,
        painter: &egui::Painter,
        node: &DrawNode,
        camera: &Camera2D,
        screen_rect: Rect,
        accent: Color32,
        hovered: bool,
    ) {
        let zoom = camera.zoom;
        let center = camera.world_to_screen(Pos2::new(node.x, node.y), screen_rect);
        let radius = (node.radius * zoom).max(2.0);
        let fill = node_fill(node.node_type, node.fill, accent);

        painter.circle_filled(center, radius, fill);

        if node.selected {
            painter.circle_stroke(
                center,
                radius + 3.0 * zoom,
                Stroke::new(2.0 * zoom.max(0.5), selection_ring_color()),
            );
        } else if hovered {
            painter.circle_stroke(
                center,
                radius + 2.0,
                Stroke::new(1.5, Color32::from_rgba_unmultiplied(255, 255, 255, 160)),
            );
        }

        if zoom >= self.label_min_zoom || node.selected || hovered {
            painter.text(
                center + Vec2::new(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                &node.label,
                FontId::proportional((11.0 * zoom).clamp(9.0, 16.0)),
                label_text_color(),
            );
        }
    }
}

/// Arrow head touching the target node's rim
fn paint_arrow_head(
    painter: &egui::Painter,
    from: Pos2,
    to: Pos2,
    target_radius: f32,
    size: f32,
    color: Color32,
) {
    let dir = to - from;
    let len = dir.length();
    if len <= target_radius + size {
        return;
    }
    let dir = dir / len;
    let tip = to - dir * target_radius;
    let back = tip - dir * size;
    let normal = Vec2::new(-dir.y, dir.x) * (size * 0.5);

    painter.add(egui::Shape::convex_polygon(
        vec![tip, back + normal, back - normal],
        color,
        Stroke::NONE,
    ));
}
