use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, Ui};
use tracing::warn;

use euro_circles::data::Metric;
use euro_circles::pipeline::RenderedChart;
use euro_circles::render::save_svg;
use euro_circles::util::format_metric;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        chart: &RenderedChart,
        next_metric: &mut Option<Metric>,
    ) {
        ui.heading("Chart Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Size circles by");
        let mut metric = chart.metric;
        ui.horizontal_wrapped(|ui| {
            for candidate in Metric::ALL {
                ui.selectable_value(&mut metric, candidate, candidate.label())
                    .on_hover_text(format!(
                        "Reload the dataset and size countries by {}.",
                        candidate.label().to_lowercase()
                    ));
            }
        });
        if metric != chart.metric {
            *next_metric = Some(metric);
        }

        ui.separator();

        ui.label("Search countries")
            .on_hover_text("Fuzzy-highlight matching countries without changing the chart.");
        ui.text_edit_singleline(&mut self.search);
        if let Some(matches) = self.search_matches(chart) {
            ui.small(format!("{} matching countries", matches.len()));
        }

        ui.separator();

        ui.label("Export");
        ui.text_edit_singleline(&mut self.export_path);
        if ui.button("Save SVG").clicked() {
            let path = Path::new(self.export_path.trim());
            self.status = Some(match save_svg(&chart.scene, path) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "svg export failed");
                    format!("Export failed: {err}")
                }
            });
        }
        if let Some(status) = &self.status {
            ui.small(status.as_str());
        }

        ui.separator();
        ui.label("Countries by region");

        egui::ScrollArea::vertical()
            .id_salt("region_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for region in chart.dataset.regions() {
                    egui::CollapsingHeader::new(format!(
                        "{} ({})",
                        region.name,
                        region.countries.len()
                    ))
                    .id_salt(("region", region.name.as_str()))
                    .show(ui, |ui| {
                        for country in &region.countries {
                            let label = format!(
                                "{} {}  {}",
                                country.flag.as_deref().unwrap_or(""),
                                country.name,
                                format_metric(chart.metric, chart.metric.value_of(country))
                            );
                            let selected = self.selection.is_selected(country);
                            if ui.selectable_label(selected, label).clicked() {
                                self.selection.select(Arc::clone(country));
                            }
                        }
                    });
                }
            });
    }
}
