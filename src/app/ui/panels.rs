use eframe::egui::{self, Align, Context, Layout, Vec2};

use euro_circles::config::ChartConfig;
use euro_circles::data::Metric;
use euro_circles::pipeline::RenderedChart;
use euro_circles::selection::SelectionState;
use euro_circles::util::format_metric;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(config: &ChartConfig) -> Self {
        Self {
            selection: SelectionState::default(),
            search: String::new(),
            search_match_cache: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            export_path: config.export.svg_path.display().to_string(),
            status: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        chart: &RenderedChart,
        next_metric: &mut Option<Metric>,
    ) {
        let dataset = &chart.dataset;

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Euro Circles");
                    ui.separator();
                    ui.label(format!("dataset: {}", dataset.name()));
                    ui.label(format!("regions: {}", dataset.regions().len()));
                    ui.label(format!("countries: {}", dataset.country_count()));
                    ui.label(format!(
                        "total {}: {}",
                        chart.metric.label().to_lowercase(),
                        format_metric(chart.metric, dataset.total(chart.metric))
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Reset view").clicked() {
                            self.reset_view();
                        }
                        ui.label(format!("zoom: {:.0}%", self.zoom * 100.0));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui, chart, next_metric));

        if self.selection.is_panel_open() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_details(ui, chart));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_chart(ui, chart));
    }
}
