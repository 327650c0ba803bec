mod app;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use euro_circles::config::ChartConfig;
use euro_circles::data::{Metric, load_dataset};
use euro_circles::pipeline::render_chart;
use euro_circles::render::save_svg;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Population,
    LandArea,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Population => Metric::Population,
            MetricArg::LandArea => Metric::LandArea,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset JSON file (overrides `[data] path`).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Metric used to size circles (overrides `[data] metric`).
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Render the chart to this SVG file and exit without opening a window.
    #[arg(long, value_name = "OUT")]
    svg: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config =
        ChartConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(data) = args.data {
        config.data.path = data;
    }
    if let Some(metric) = args.metric {
        config.data.metric = metric.into();
    }

    if let Some(out) = args.svg {
        return export_headless(&config, &out);
    }

    let config = Arc::new(config);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Euro Circles",
        options,
        Box::new(move |cc| Ok(Box::new(app::EuroCirclesApp::new(cc, config)))),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}

fn export_headless(config: &ChartConfig, out: &Path) -> anyhow::Result<()> {
    let dataset = load_dataset(&config.data.path)
        .with_context(|| format!("failed to load {}", config.data.path.display()))?;
    let chart = render_chart(Arc::new(dataset), config.data.metric, 1, config);
    save_svg(&chart.scene, out).with_context(|| format!("failed to write {}", out.display()))
}
