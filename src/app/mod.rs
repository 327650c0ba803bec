use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui::{self, Context, Vec2};

use euro_circles::config::ChartConfig;
use euro_circles::data::{DataError, LoadOutcome, Metric, spawn_load};
use euro_circles::pipeline::{ChartPipeline, RenderPhase};
use euro_circles::selection::SelectionState;

mod chart;
mod render_utils;
mod ui;

pub struct EuroCirclesApp {
    config: Arc<ChartConfig>,
    pipeline: ChartPipeline,
    load_rx: Option<Receiver<LoadOutcome>>,
    view: ViewModel,
}

struct ViewModel {
    selection: SelectionState,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    pan: Vec2,
    zoom: f32,
    export_path: String,
    status: Option<String>,
}

struct SearchMatchCache {
    query: String,
    generation: u64,
    matches: Arc<HashSet<usize>>,
}

impl EuroCirclesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Arc<ChartConfig>) -> Self {
        let mut app = Self {
            pipeline: ChartPipeline::new(Arc::clone(&config)),
            view: ViewModel::new(&config),
            load_rx: None,
            config,
        };
        let metric = app.config.data.metric;
        app.start_pass(metric);
        app
    }

    /// Replacing the receiver drops any load still in flight.
    fn start_pass(&mut self, metric: Metric) {
        let generation = self.pipeline.begin(metric);
        self.load_rx = Some(spawn_load(self.config.data.path.clone(), generation));
    }

    fn poll_load(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => {
                self.pipeline.complete(outcome);
            }
            Err(TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                self.pipeline.complete(LoadOutcome {
                    generation: self.pipeline.generation(),
                    result: Err(DataError::WorkerDisconnected),
                });
            }
        }
    }
}

impl eframe::App for EuroCirclesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        let mut next_metric = None;

        match self.pipeline.phase() {
            RenderPhase::Idle => {
                next_metric = Some(self.pipeline.metric());
            }
            RenderPhase::Loading { metric, .. } => {
                let metric = *metric;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!("Loading countries by {}...", metric.label().to_lowercase()));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            RenderPhase::Failed {
                metric, message, ..
            } => {
                let metric = *metric;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the country dataset");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.small(format!("path: {}", self.config.data.path.display()));
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        next_metric = Some(metric);
                    }
                });
            }
            RenderPhase::Rendered(chart) => {
                self.view.show(ctx, chart, &mut next_metric);
            }
        }

        if let Some(metric) = next_metric {
            self.view.search_match_cache = None;
            self.start_pass(metric);
        }
    }
}
