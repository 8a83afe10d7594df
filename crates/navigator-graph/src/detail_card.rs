//! Detail card - floating panel for the selected node
//!
//! Shows topics, related nodes (clickable) and relevant personas, with a
//! Navigate button that hands the node to the host.

use egui::{Align2, Color32, RichText, Ui};
use semantic_navigator::{EdgeDirection, NodeDetail};

use crate::colors::parse_color_tag;

/// What the user did on the card this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Close,
    /// Select a related node
    Select(String),
    Navigate,
}

/// Render the card as an `egui::Window`. Returns at most one action.
pub fn render_detail_card(ctx: &egui::Context, detail: &NodeDetail) -> Option<CardAction> {
    let mut action = None;
    egui::Window::new("Node Details")
        .id(egui::Id::new("navigator_detail_card"))
        .default_size([280.0, 340.0])
        .anchor(Align2::RIGHT_TOP, [-20.0, 60.0])
        .collapsible(true)
        .resizable(true)
        .show(ctx, |ui| {
            action = render_card_content(ui, detail);
        });
    action
}

/// Card shown when the selected id does not resolve
pub fn render_missing_card(ctx: &egui::Context, node_id: &str) -> Option<CardAction> {
    let mut action = None;
    egui::Window::new("Node Details")
        .id(egui::Id::new("navigator_detail_card"))
        .anchor(Align2::RIGHT_TOP, [-20.0, 60.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("No details for {}", node_id)).italics());
            if ui.button("Close").clicked() {
                action = Some(CardAction::Close);
            }
        });
    action
}

fn render_card_content(ui: &mut Ui, detail: &NodeDetail) -> Option<CardAction> {
    let muted = Color32::from_rgb(107, 114, 128);
    let mut action = None;

    ui.heading(detail.title.as_str());
    ui.label(RichText::new(detail.node_type.as_str()).color(muted));

    ui.add_space(8.0);
    ui.separator();

    if !detail.topics.is_empty() {
        ui.label(RichText::new("Topics").strong());
        ui.horizontal_wrapped(|ui| {
            for topic in &detail.topics {
                ui.label(RichText::new(&topic.name).small())
                    .on_hover_text(format!(
                        "frequency {} | importance {:.2}",
                        topic.frequency, topic.importance
                    ));
            }
        });
        ui.add_space(4.0);
    }

    if !detail.related_nodes.is_empty() {
        ui.collapsing(
            RichText::new(format!("Related ({})", detail.related_nodes.len())).strong(),
            |ui| {
                for related in &detail.related_nodes {
                    let arrow = match related.direction {
                        EdgeDirection::Outgoing => "->",
                        EdgeDirection::Incoming => "<-",
                    };
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(arrow).small().color(muted));
                        if ui.link(related.node.title.as_str()).clicked() {
                            action = Some(CardAction::Select(related.node.id.clone()));
                        }
                        ui.label(RichText::new(&related.edge_type).small().color(muted));
                    });
                }
            },
        );
    }

    if !detail.relevant_personas.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("Relevant for").strong());
        for persona in &detail.relevant_personas {
            let color = parse_color_tag(&persona.color_tag).unwrap_or(muted);
            ui.colored_label(color, persona.name.as_str())
                .on_hover_text(persona.description.as_str());
        }
    }

    ui.add_space(8.0);
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Navigate").clicked() {
            action = Some(CardAction::Navigate);
        }
        if ui.button("Close").clicked() {
            action = Some(CardAction::Close);
        }
    });

    action
}
