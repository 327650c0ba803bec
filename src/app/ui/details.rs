use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};
use serde_json::Value;

use euro_circles::pipeline::RenderedChart;
use euro_circles::util::{format_area, format_count};

use super::super::ViewModel;

fn metadata_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "n/a".to_owned(),
        other => other.to_string(),
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui, chart: &RenderedChart) {
        ui.horizontal(|ui| {
            ui.heading("Country Details");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    self.selection.close_panel();
                }
            });
        });
        ui.add_space(6.0);

        let Some(country) = self.selection.current().map(Arc::clone) else {
            ui.label("Click a country circle to inspect it.");
            return;
        };

        let title = match &country.flag {
            Some(flag) => format!("{flag} {}", country.name),
            None => country.name.clone(),
        };
        ui.label(RichText::new(title).strong().size(18.0));
        if let Some(region) = chart.dataset.region_of(&country) {
            ui.small(format!("Region: {}", region.name));
        }
        ui.add_space(6.0);

        egui::Grid::new("country_fields")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Population");
                ui.label(
                    country
                        .population
                        .map(format_count)
                        .unwrap_or_else(|| "unknown".to_owned()),
                );
                ui.end_row();

                ui.label("Land area");
                ui.label(
                    country
                        .land_area_km2
                        .map(format_area)
                        .unwrap_or_else(|| "unknown".to_owned()),
                );
                ui.end_row();

                ui.label("Density");
                ui.label(
                    country
                        .density_per_km2()
                        .map(|density| format!("{density:.1} per km²"))
                        .unwrap_or_else(|| "unknown".to_owned()),
                );
                ui.end_row();
            });

        if let Some(url) = &country.wikipedia {
            ui.add_space(6.0);
            ui.hyperlink_to("Read on Wikipedia", url);
        }

        if !country.metadata.is_empty() {
            ui.separator();
            ui.label(RichText::new("Other fields").strong());
            egui::Grid::new("country_metadata")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (key, value) in &country.metadata {
                        ui.label(key.as_str());
                        ui.label(metadata_text(value));
                        ui.end_row();
                    }
                });
        }
    }
}
