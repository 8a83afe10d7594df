//! Color palettes for the navigator graph
//!
//! Node fills by type, journey highlight colors, and persona color tags.

use egui::Color32;
use navigator_types::NodeType;
use semantic_navigator::{FillState, StrokeState};

/// Journey highlight when the persona has no usable color tag
pub const DEFAULT_ACCENT: Color32 = Color32::from_rgb(245, 158, 11); // Amber-500

// =============================================================================
// NODE COLORS
// =============================================================================

/// Base fill for a node type
pub fn node_type_fill(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::Page => Color32::from_rgb(96, 165, 250),    // Blue-400
        NodeType::Section => Color32::from_rgb(148, 163, 184), // Slate-400
        NodeType::Topic => Color32::from_rgb(168, 85, 247),   // Purple-500
    }
}

/// Fill for a drawn node, with journey state applied
pub fn node_fill(node_type: NodeType, fill: FillState, accent: Color32) -> Color32 {
    match fill {
        FillState::Active => accent,
        FillState::OnPath => blend(node_type_fill(node_type), accent, 0.5),
        FillState::Default => node_type_fill(node_type),
    }
}

/// Ring drawn around the selected node
pub fn selection_ring_color() -> Color32 {
    Color32::WHITE
}

pub fn label_text_color() -> Color32 {
    Color32::from_rgb(203, 213, 225) // Slate-300
}

// =============================================================================
// EDGE COLORS
// =============================================================================

pub fn edge_color(stroke: StrokeState, accent: Color32) -> Color32 {
    match stroke {
        StrokeState::Journey => accent,
        StrokeState::Default => Color32::from_rgba_unmultiplied(100, 116, 139, 140), // Slate-500
    }
}

/// Stroke width in world units; heavier edges draw thicker
pub fn edge_width(stroke: StrokeState, weight: f32) -> f32 {
    let base = 1.0 + weight.clamp(0.0, 3.0) * 0.5;
    match stroke {
        StrokeState::Journey => base * 2.5,
        StrokeState::Default => base,
    }
}

// =============================================================================
// PERSONA COLORS
// =============================================================================

/// Parse a persona color tag: `#rrggbb`, `#rgb`, or a few named colors
pub fn parse_color_tag(tag: &str) -> Option<Color32> {
    let tag = tag.trim();
    if let Some(hex) = tag.strip_prefix('#') {
        return parse_hex(hex);
    }
    match tag.to_lowercase().as_str() {
        "blue" => Some(Color32::from_rgb(59, 130, 246)),
        "green" => Some(Color32::from_rgb(34, 197, 94)),
        "red" => Some(Color32::from_rgb(239, 68, 68)),
        "amber" | "orange" => Some(DEFAULT_ACCENT),
        "purple" => Some(Color32::from_rgb(168, 85, 247)),
        "teal" => Some(Color32::from_rgb(20, 184, 166)),
        "pink" => Some(Color32::from_rgb(236, 72, 153)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

/// Accent for a draw-list, falling back to `DEFAULT_ACCENT`
pub fn accent_color(tag: Option<&str>) -> Color32 {
    tag.and_then(parse_color_tag).unwrap_or(DEFAULT_ACCENT)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
