use eframe::egui::{self, Pos2, Rect, Ui};

use euro_circles::render::{Scene, SceneNode};

use super::super::ViewModel;
use super::super::render_utils::{screen_to_world, world_to_scene};

impl ViewModel {
    pub(in crate::app) const MIN_ZOOM: f32 = 0.5;
    pub(in crate::app) const MAX_ZOOM: f32 = 40.0;

    pub(in crate::app) fn handle_chart_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        fit: f32,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, fit * self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * fit * self.zoom);
    }

    pub(in crate::app) fn handle_chart_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = egui::Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub(in crate::app) fn scene_point(
        &self,
        rect: Rect,
        scale: f32,
        scene: &Scene,
        screen: Pos2,
    ) -> (f64, f64) {
        world_to_scene(scene.size, screen_to_world(rect, self.pan, scale, screen))
    }

    pub(in crate::app) fn hovered_leaf<'a>(
        &self,
        ui: &Ui,
        rect: Rect,
        scale: f32,
        scene: &'a Scene,
    ) -> Option<&'a SceneNode> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }
        let (x, y) = self.scene_point(rect, scale, scene, pointer);
        scene.leaf_at(x, y)
    }
}
