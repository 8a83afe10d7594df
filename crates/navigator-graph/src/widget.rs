//! NavigatorWidget - the Graph Navigator view for egui
//!
//! Owns a `Navigator` and the UI-only state around it (camera, hover, hit
//! index). The journey timer runs on egui frame time: each frame the widget
//! sets its `ManualClock` to `InputState::time` and calls `update()`.

use std::time::Duration;

use egui::{Color32, Rect, RichText, Sense, Vec2};
use semantic_navigator::{
    DrawList, GraphDataset, JourneyStatus, ManualClock, Navigator, NavigatorAction,
    NavigatorConfig, SessionState, ViewMode,
};

use crate::camera::Camera2D;
use crate::colors::parse_color_tag;
use crate::detail_card::{render_detail_card, render_missing_card, CardAction};
use crate::render::GraphPainter;
use crate::spatial::SpatialIndex;

/// Pointer slack for hit testing, in screen pixels
const HIT_SLOP: f32 = 6.0;
const FIT_PADDING: f32 = 50.0;

pub struct NavigatorWidget {
    navigator: Navigator,
    clock: ManualClock,
    camera: Camera2D,
    painter: GraphPainter,
    spatial: SpatialIndex,
    hovered: Option<String>,
    /// Fit the camera on the next frame
    needs_fit: bool,
}

impl NavigatorWidget {
    /// Wrap a navigator. Its clock is replaced by the widget's frame clock.
    pub fn new(navigator: Navigator) -> Self {
        let clock = ManualClock::new();
        Self {
            navigator: navigator.with_clock(clock.clone()),
            clock,
            camera: Camera2D::new(),
            painter: GraphPainter::new(),
            spatial: SpatialIndex::new(),
            hovered: None,
            needs_fit: true,
        }
    }

    pub fn from_dataset(dataset: GraphDataset, config: NavigatorConfig) -> Self {
        Self::new(Navigator::new(dataset, config))
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Drain actions for the host (navigate requests)
    pub fn take_actions(&mut self) -> Vec<NavigatorAction> {
        self.navigator.take_actions()
    }

    /// Re-fit the camera to the visible nodes on the next frame
    pub fn fit_to_content(&mut self) {
        self.needs_fit = true;
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// End the session, returning its final state and undrained actions
    pub fn dispose(self) -> (SessionState, Vec<NavigatorAction>) {
        self.navigator.dispose()
    }

    // =========================================================================
    // UI
    // =========================================================================

    /// Main UI function
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);
        self.clock.set(Duration::from_secs_f64(now.max(0.0)));
        self.navigator.update();

        self.render_controls(ui);
        ui.separator();

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let screen_rect = response.rect;

        let list = self.navigator.draw_list();
        self.spatial = SpatialIndex::from_draw_list(&list);

        if self.needs_fit {
            if let Some(bounds) = list.bounds {
                self.camera.fit_to_bounds(bounds, screen_rect, FIT_PADDING);
                self.camera.snap_to_target();
            }
            self.needs_fit = false;
        }

        let dt = ui.input(|i| i.stable_dt);
        self.camera.update(dt);

        let input_changed = self.handle_input(&response, screen_rect);
        // Selection changes flip the ring, so redraw from fresh state
        let list = if input_changed {
            self.navigator.draw_list()
        } else {
            list
        };

        painter.rect_filled(screen_rect, 0.0, Color32::from_rgb(15, 23, 42));
        self.painter
            .paint(&painter, &list, &self.camera, screen_rect, self.hovered.as_deref());
        self.render_chrome(&painter, &list, screen_rect);
        self.render_detail(ui.ctx());

        if self.camera.is_animating() || input_changed {
            ui.ctx().request_repaint();
        }
        if let Some(wait) = self.navigator.next_tick_in() {
            ui.ctx().request_repaint_after(wait);
        }
    }

    /// View mode, topic chips and journey playback
    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for mode in ViewMode::all() {
                let selected = self.navigator.view_mode() == *mode;
                if ui.selectable_label(selected, mode.display_name()).clicked() && !selected {
                    self.navigator.set_view_mode(*mode);
                    self.needs_fit = true;
                }
            }

            ui.separator();
            self.render_persona_controls(ui);
        });

        let chips: Vec<(String, String, bool)> = self
            .navigator
            .dataset()
            .topics()
            .iter()
            .map(|t| {
                let selected = self.navigator.selected_topics().contains(&t.id);
                (t.id.clone(), t.name.clone(), selected)
            })
            .collect();

        if chips.is_empty() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Topics").strong());
            for (id, name, selected) in &chips {
                if ui.selectable_label(*selected, name.as_str()).clicked() {
                    self.navigator.toggle_topic(id);
                }
            }
            if !self.navigator.selected_topics().is_empty() && ui.small_button("Clear").clicked() {
                self.navigator.clear_filters();
            }
        });
    }

    fn render_persona_controls(&mut self, ui: &mut egui::Ui) {
        let personas: Vec<(String, String, String)> = self
            .navigator
            .dataset()
            .personas()
            .iter()
            .map(|p| (p.id.clone(), p.name.clone(), p.color_tag.clone()))
            .collect();
        if personas.is_empty() {
            return;
        }

        let current = self.navigator.selected_persona().map(str::to_string);
        let current_name = current
            .as_deref()
            .and_then(|id| personas.iter().find(|p| p.0 == id))
            .map(|p| p.1.clone())
            .unwrap_or_else(|| "Select persona".to_string());

        let mut choice: Option<Option<String>> = None;
        egui::ComboBox::from_id_salt("navigator_persona")
            .selected_text(current_name)
            .show_ui(ui, |ui| {
                if ui.selectable_label(current.is_none(), "None").clicked() {
                    choice = Some(None);
                }
                for (id, name, color) in &personas {
                    let text = match parse_color_tag(color) {
                        Some(c) => RichText::new(name.as_str()).color(c),
                        None => RichText::new(name.as_str()),
                    };
                    if ui.selectable_label(current.as_deref() == Some(id.as_str()), text).clicked() {
                        choice = Some(Some(id.clone()));
                    }
                }
            });

        match choice {
            Some(Some(id)) => self.navigator.select_persona(&id),
            Some(None) => self.navigator.clear_persona(),
            None => {}
        }

        if self.navigator.selected_persona().is_none() {
            return;
        }

        if self.navigator.journey_status() == JourneyStatus::Playing {
            if ui.button("Pause").clicked() {
                self.navigator.pause();
            }
        } else if ui.button("Play").clicked() {
            self.navigator.start();
        }
        if ui.button("Reset").clicked() {
            self.navigator.reset();
        }

        let len = self.navigator.journey().journey().len();
        if len > 0 {
            let text = format!("step {}/{}", self.navigator.journey_step() + 1, len);
            ui.add(
                egui::ProgressBar::new(self.navigator.progress())
                    .desired_width(140.0)
                    .text(text),
            );
        }
    }

    /// Hover, click-to-select, drag-to-pan, scroll-to-zoom, keys.
    /// Returns true when the session changed.
    fn handle_input(&mut self, response: &egui::Response, screen_rect: Rect) -> bool {
        let mut changed = false;
        let pointer = response.hover_pos();
        let slop = HIT_SLOP / self.camera.zoom;

        self.hovered = pointer.and_then(|pos| {
            let world = self.camera.screen_to_world(pos, screen_rect);
            self.spatial
                .hit_test([world.x, world.y], slop)
                .map(|n| n.id.clone())
        });

        if response.clicked() {
            match self.hovered.clone() {
                Some(node_id) => {
                    if self.navigator.selected_node() == Some(node_id.as_str()) {
                        self.navigator.clear_selection();
                    } else {
                        self.navigator.select_node(&node_id);
                    }
                }
                None => self.navigator.clear_selection(),
            }
            tracing::trace!(selected = ?self.navigator.selected_node(), "graph click");
            changed = true;
        }

        if response.double_clicked() && self.hovered.is_none() {
            self.needs_fit = true;
        }

        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length() > 0.0 {
                self.camera.pan(delta);
            }
        }

        let scroll = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll.y != 0.0 {
            if let Some(pos) = pointer {
                self.camera.zoom_at(1.0 + scroll.y * 0.001, pos, screen_rect);
            }
        }

        response.ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                self.navigator.clear_selection();
                changed = true;
            }
            if i.key_pressed(egui::Key::R) {
                self.needs_fit = true;
            }
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                self.camera.zoom_by(1.2);
            }
            if i.key_pressed(egui::Key::Minus) {
                self.camera.zoom_by(1.0 / 1.2);
            }
        });

        changed
    }

    /// Stats overlay and hints
    fn render_chrome(&self, painter: &egui::Painter, list: &DrawList, screen_rect: Rect) {
        let stats = self.navigator.stats();
        let dim = Color32::from_rgb(120, 120, 120);

        painter.text(
            screen_rect.left_top() + Vec2::new(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            stats.to_string(),
            egui::FontId::proportional(12.0),
            Color32::from_rgb(150, 150, 150),
        );

        let unplaced = unplaced_count(&self.navigator, list);
        if unplaced > 0 {
            painter.text(
                screen_rect.left_top() + Vec2::new(10.0, 28.0),
                egui::Align2::LEFT_TOP,
                format!("{} nodes without a position", unplaced),
                egui::FontId::proportional(10.0),
                dim,
            );
        }

        if let Some(node_id) = self.navigator.current_journey_node() {
            let status = self.navigator.journey_status();
            if status != JourneyStatus::Idle {
                let title = self
                    .navigator
                    .dataset()
                    .node(node_id)
                    .map(|n| n.title.as_str())
                    .unwrap_or(node_id);
                painter.text(
                    screen_rect.right_top() + Vec2::new(-10.0, 10.0),
                    egui::Align2::RIGHT_TOP,
                    format!("{}: {}", status.as_str(), title),
                    egui::FontId::proportional(12.0),
                    Color32::from_rgb(96, 165, 250),
                );
            }
        }

        painter.text(
            screen_rect.left_bottom() + Vec2::new(10.0, -30.0),
            egui::Align2::LEFT_BOTTOM,
            format!("Zoom: {:.0}%", self.camera.zoom * 100.0),
            egui::FontId::proportional(11.0),
            dim,
        );
        painter.text(
            screen_rect.left_bottom() + Vec2::new(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            "Drag: Pan | Scroll: Zoom | Click: Select | Esc: Clear | R: Fit",
            egui::FontId::proportional(10.0),
            Color32::from_rgb(100, 100, 100),
        );
    }

    fn render_detail(&mut self, ctx: &egui::Context) {
        let Some(node_id) = self.navigator.selected_node().map(str::to_string) else {
            return;
        };

        let action = match self.navigator.selected_node_detail() {
            Some(detail) => render_detail_card(ctx, &detail),
            None => render_missing_card(ctx, &node_id),
        };

        match action {
            Some(CardAction::Close) => self.navigator.clear_selection(),
            Some(CardAction::Select(id)) => {
                self.navigator.select_node(&id);
                if let Some(pos) = self.navigator.layout().get(&id) {
                    self.camera.pan_to(egui::Pos2::new(pos.x, pos.y));
                }
            }
            Some(CardAction::Navigate) => {
                if self.navigator.navigate() {
                    tracing::debug!(node_id = %node_id, "navigate requested from detail card");
                }
            }
            None => {}
        }
    }
}

/// Visible ids the draw-list could not place. Duplicate ids count once.
fn unplaced_count(navigator: &Navigator, list: &DrawList) -> usize {
    navigator
        .visible_graph()
        .node_ids()
        .len()
        .saturating_sub(list.nodes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_types::{Edge, GraphData, Node, NodeType, Persona};
    use pretty_assertions::assert_eq;

    fn widget() -> NavigatorWidget {
        let dataset = GraphDataset::new(GraphData {
            nodes: vec![
                Node::new("a", NodeType::Page, "A"),
                Node::new("b", NodeType::Page, "B"),
                Node::new("c", NodeType::Page, "C"),
            ],
            edges: vec![Edge::new("a", "b", "links_to"), Edge::new("b", "c", "links_to")],
            topics: vec![],
            personas: vec![Persona::new("p", "Visitor").with_journey(["a", "b", "c"])],
        });
        NavigatorWidget::from_dataset(dataset, NavigatorConfig::default())
    }

    fn frame(ctx: &egui::Context, widget: &mut NavigatorWidget, time: f64) {
        let input = egui::RawInput {
            time: Some(time),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| widget.ui(ui));
        });
    }

    #[test]
    fn test_frame_time_drives_journey() {
        let ctx = egui::Context::default();
        let mut widget = widget();

        frame(&ctx, &mut widget, 0.0);
        widget.navigator_mut().select_persona("p");
        widget.navigator_mut().start();
        assert_eq!(widget.navigator().journey_step(), 0);

        frame(&ctx, &mut widget, 1.0);
        assert_eq!(widget.navigator().journey_step(), 0);

        frame(&ctx, &mut widget, 1.6);
        assert_eq!(widget.navigator().journey_step(), 1);

        frame(&ctx, &mut widget, 10.0);
        assert_eq!(widget.navigator().journey_status(), JourneyStatus::Complete);
    }

    #[test]
    fn test_duplicate_ids_are_not_reported_unplaced() {
        let dataset = GraphDataset::new(GraphData {
            nodes: vec![
                Node::new("a", NodeType::Page, "A"),
                Node::new("a", NodeType::Page, "A again"),
                Node::new("b", NodeType::Page, "B"),
            ],
            ..GraphData::default()
        });
        let widget = NavigatorWidget::from_dataset(dataset, NavigatorConfig::default());
        let list = widget.navigator().draw_list();

        assert_eq!(widget.navigator().stats().visible_node_count, 3);
        assert_eq!(list.nodes.len(), 2);
        assert_eq!(unplaced_count(widget.navigator(), &list), 0);
    }

    #[test]
    fn test_navigate_action_reaches_host() {
        let ctx = egui::Context::default();
        let mut widget = widget();
        frame(&ctx, &mut widget, 0.0);

        widget.navigator_mut().select_node("b");
        frame(&ctx, &mut widget, 0.1);
        assert_eq!(widget.navigator().selected_node(), Some("b"));

        widget.navigator_mut().navigate();
        assert_eq!(
            widget.take_actions(),
            vec![NavigatorAction::Navigate {
                node_id: "b".to_string()
            }]
        );
    }
}
