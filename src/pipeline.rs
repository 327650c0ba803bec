//! One chart render pass: load, hierarchy, layout, scene.
//!
//! Every pass gets a generation number. A load outcome is only applied when it
//! belongs to the most recent pass, so a slow load never overwrites a newer
//! chart.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::data::{Dataset, LoadOutcome, Metric};
use crate::hierarchy::build_hierarchy;
use crate::pack::{PackLayout, pack};
use crate::render::{Scene, build_scene};

#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub generation: u64,
    pub metric: Metric,
    pub dataset: Arc<Dataset>,
    pub layout: PackLayout,
    pub scene: Scene,
}

#[derive(Clone, Debug)]
pub enum RenderPhase {
    Idle,
    Loading {
        generation: u64,
        metric: Metric,
    },
    Rendered(Box<RenderedChart>),
    Failed {
        generation: u64,
        metric: Metric,
        message: String,
    },
}

pub fn render_chart(
    dataset: Arc<Dataset>,
    metric: Metric,
    generation: u64,
    config: &ChartConfig,
) -> RenderedChart {
    let started = Instant::now();
    let hierarchy = build_hierarchy(&dataset, metric);
    let layout = pack(&hierarchy, config.pack_options());
    let scene = build_scene(&layout, metric, config);

    info!(
        generation,
        metric = metric.label(),
        circles = layout.circles.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered chart"
    );

    RenderedChart {
        generation,
        metric,
        dataset,
        layout,
        scene,
    }
}

pub struct ChartPipeline {
    config: Arc<ChartConfig>,
    generation: u64,
    metric: Metric,
    phase: RenderPhase,
}

impl ChartPipeline {
    pub fn new(config: Arc<ChartConfig>) -> Self {
        let metric = config.data.metric;
        Self {
            config,
            generation: 0,
            metric,
            phase: RenderPhase::Idle,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn phase(&self) -> &RenderPhase {
        &self.phase
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rendered(&self) -> Option<&RenderedChart> {
        match &self.phase {
            RenderPhase::Rendered(chart) => Some(chart),
            _ => None,
        }
    }

    /// Starts a new pass and returns its generation. The previous chart is
    /// dropped right away.
    pub fn begin(&mut self, metric: Metric) -> u64 {
        self.generation += 1;
        self.metric = metric;
        self.phase = RenderPhase::Loading {
            generation: self.generation,
            metric,
        };
        info!(generation = self.generation, metric = metric.label(), "starting render pass");
        self.generation
    }

    pub fn retry(&mut self) -> u64 {
        self.begin(self.metric)
    }

    /// Applies a finished load. Returns `false` when the outcome belongs to a
    /// superseded pass and was ignored.
    pub fn complete(&mut self, outcome: LoadOutcome) -> bool {
        let current = matches!(
            self.phase,
            RenderPhase::Loading { generation, .. } if generation == outcome.generation
        );
        if !current {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "ignoring load outcome from a superseded pass"
            );
            return false;
        }

        self.phase = match outcome.result {
            Ok(dataset) => RenderPhase::Rendered(Box::new(render_chart(
                Arc::new(dataset),
                self.metric,
                outcome.generation,
                &self.config,
            ))),
            Err(err) => {
                warn!(generation = outcome.generation, error = %err, "failed to load dataset");
                RenderPhase::Failed {
                    generation: outcome.generation,
                    metric: self.metric,
                    message: err.to_string(),
                }
            }
        };
        true
    }
}
