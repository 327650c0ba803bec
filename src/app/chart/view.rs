use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Sense, Stroke, Ui, vec2};

use euro_circles::pipeline::RenderedChart;
use euro_circles::render::SceneNode;

use super::super::ViewModel;
use super::super::render_utils::{
    CANVAS_BACKDROP, circle_visible, fade_to_backdrop, fit_scale, scene_to_world, to_color32,
    world_to_screen,
};

const LABEL_COLOR: Color32 = Color32::from_rgb(24, 18, 28);
const MIN_LABEL_PX: f32 = 5.0;

fn draw_labels(painter: &Painter, node: &SceneNode, center: Pos2, scale: f32) {
    for line in &node.labels {
        let size = line.font_size as f32 * scale;
        if size < MIN_LABEL_PX {
            continue;
        }

        let baseline = center + vec2(0.0, line.offset_y as f32 * scale);
        let font = FontId::proportional(size);
        painter.text(baseline, Align2::CENTER_BOTTOM, &line.text, font.clone(), LABEL_COLOR);
        if line.bold {
            // default fonts ship no bold face
            painter.text(
                baseline + vec2(0.6, 0.0),
                Align2::CENTER_BOTTOM,
                &line.text,
                font,
                LABEL_COLOR,
            );
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui, chart: &RenderedChart) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, CANVAS_BACKDROP);

        let scene = &chart.scene;
        let fit = fit_scale(rect, scene.size);
        self.handle_chart_zoom(ui, rect, fit, &response);
        self.handle_chart_pan(&response);
        let scale = fit * self.zoom;

        let background = &scene.background;
        painter.circle_filled(
            world_to_screen(rect, self.pan, scale, scene_to_world(scene.size, background.x, background.y)),
            background.r as f32 * scale,
            to_color32(background.fill),
        );

        let matches = self.search_matches(chart);
        let hovered = self.hovered_leaf(ui, rect, scale, scene);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        for (index, node) in scene.nodes.iter().enumerate() {
            let radius = node.circle.r as f32 * scale;
            if radius < 0.5 {
                continue;
            }
            let center = world_to_screen(
                rect,
                self.pan,
                scale,
                scene_to_world(scene.size, node.circle.x, node.circle.y),
            );
            if !circle_visible(rect, center, radius) {
                continue;
            }

            let is_match = matches.as_ref().is_some_and(|matches| matches.contains(&index));
            let is_hovered = hovered.is_some_and(|leaf| std::ptr::eq(leaf, node));
            let is_selected = node
                .country
                .as_ref()
                .is_some_and(|country| self.selection.is_selected(country));

            let mut fill = to_color32(node.circle.fill);
            if node.is_country() && matches.is_some() && !is_match {
                fill = fade_to_backdrop(fill, 0.45);
            }
            if is_hovered {
                fill = fill.lerp_to_gamma(Color32::WHITE, 0.25);
            }
            painter.circle_filled(center, radius, fill);

            if is_selected {
                painter.circle_stroke(center, radius, Stroke::new(2.5, LABEL_COLOR));
            } else if is_match {
                painter.circle_stroke(center, radius, Stroke::new(2.0, Color32::WHITE));
            } else if is_hovered {
                painter.circle_stroke(
                    center,
                    radius,
                    Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 180)),
                );
            }

            draw_labels(&painter, node, center, scale);
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let (x, y) = self.scene_point(rect, scale, scene, pointer);
            scene.dispatch_click(x, y, &mut self.selection);
        }
    }
}
