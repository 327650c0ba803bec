use eframe::egui::{Color32, Pos2, Rect, Vec2};

use euro_circles::render::Rgb;

pub(super) const CANVAS_BACKDROP: Color32 = Color32::from_rgb(19, 23, 29);

pub(super) fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Pulls a fill toward the canvas backdrop; used for countries outside a search.
pub(super) fn fade_to_backdrop(color: Color32, amount: f32) -> Color32 {
    color.lerp_to_gamma(CANVAS_BACKDROP, amount.clamp(0.0, 1.0))
}

pub(super) fn circle_visible(viewport: Rect, center: Pos2, radius: f32) -> bool {
    viewport.expand(radius).contains(center)
}

/// World space is scene space shifted so the chart center sits at the origin.
pub(super) fn scene_to_world(scene_size: f64, x: f64, y: f64) -> Vec2 {
    let half = scene_size / 2.0;
    Vec2::new((x - half) as f32, (y - half) as f32)
}

pub(super) fn world_to_scene(scene_size: f64, world: Vec2) -> (f64, f64) {
    let half = scene_size / 2.0;
    (world.x as f64 + half, world.y as f64 + half)
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

/// Scale at which the whole chart fits the viewport with a small margin.
pub(super) fn fit_scale(rect: Rect, scene_size: f64) -> f32 {
    (rect.width().min(rect.height()) * 0.96 / scene_size as f32).max(0.01)
}
