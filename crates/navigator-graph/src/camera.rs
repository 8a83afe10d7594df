//! Camera2D - pan/zoom with smoothed interpolation
//!
//! Provides world-to-screen and screen-to-world coordinate transforms.
//!
//! - Camera state is UI-only, never part of the navigator session
//! - Call `update(dt)` at the start of a frame, then use the transforms

use egui::{Pos2, Rect, Vec2};
use semantic_navigator::Bounds;

/// Fraction of the remaining distance covered per second
const SMOOTHING: f32 = 10.0;

/// 2D camera with eased pan and zoom
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Center of the view in world coordinates
    pub center: Pos2,
    pub target_center: Pos2,
    /// 1.0 = 100%
    pub zoom: f32,
    pub target_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            center: Pos2::ZERO,
            target_center: Pos2::ZERO,
            zoom: 1.0,
            target_zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl Camera2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease toward the targets (call every frame)
    pub fn update(&mut self, dt: f32) {
        let t = (dt.min(0.1) * SMOOTHING).min(1.0);
        self.center += (self.target_center - self.center) * t;
        self.zoom += (self.target_zoom - self.zoom) * t;

        if (self.target_center - self.center).length() < 0.01 {
            self.center = self.target_center;
        }
        if (self.target_zoom - self.zoom).abs() < 0.0001 {
            self.zoom = self.target_zoom;
        }
    }

    /// Jump to the targets without easing
    pub fn snap_to_target(&mut self) {
        self.center = self.target_center;
        self.zoom = self.target_zoom;
    }

    pub fn is_animating(&self) -> bool {
        (self.center - self.target_center).length() > 0.1
            || (self.zoom - self.target_zoom).abs() > 0.001
    }

    // =========================================================================
    // CONTROLS
    // =========================================================================

    /// Pan by a screen-space delta
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.target_center -= screen_delta / self.target_zoom;
    }

    /// Center on a world position (eased)
    pub fn pan_to(&mut self, world_pos: Pos2) {
        self.target_center = world_pos;
    }

    /// Zoom by `factor`, keeping `screen_pos` fixed under the pointer
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Pos2, screen_rect: Rect) {
        let old_zoom = self.target_zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() <= 0.001 {
            return;
        }

        let offset = screen_pos - screen_rect.center();
        self.target_center += offset / old_zoom - offset / new_zoom;
        self.target_zoom = new_zoom;
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.target_zoom = (self.target_zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Frame the given world bounds, leaving `padding` pixels on each side
    pub fn fit_to_bounds(&mut self, bounds: Bounds, screen_rect: Rect, padding: f32) {
        let center = bounds.center();
        self.target_center = Pos2::new(center.x, center.y);

        let available = (screen_rect.size() - Vec2::splat(padding * 2.0)).max(Vec2::splat(1.0));
        // A single node (or a flat row) has no extent on one axis
        let width = bounds.width().max(1.0);
        let height = bounds.height().max(1.0);
        let zoom = (available.x / width).min(available.y / height);
        self.target_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn reset(&mut self) {
        self.target_center = Pos2::ZERO;
        self.target_zoom = 1.0;
    }

    // =========================================================================
    // COORDINATE TRANSFORMS
    // =========================================================================

    pub fn world_to_screen(&self, world_pos: Pos2, screen_rect: Rect) -> Pos2 {
        screen_rect.center() + (world_pos - self.center) * self.zoom
    }

    pub fn screen_to_world(&self, screen_pos: Pos2, screen_rect: Rect) -> Pos2 {
        self.center + (screen_pos - screen_rect.center()) / self.zoom
    }

    /// World-space rectangle currently on screen
    pub fn visible_bounds(&self, screen_rect: Rect) -> Rect {
        Rect::from_center_size(self.center, screen_rect.size() / self.zoom)
    }
}
