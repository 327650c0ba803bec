use std::sync::Arc;

use tracing::debug;

use crate::config::ChartConfig;
use crate::data::{CountryRecord, Metric};
use crate::pack::{LayoutCircle, PackLayout};
use crate::util::format_metric;
use crate::wrap::wrap_text;

use super::color::{DepthColorScale, Rgb};

/// Receives the country behind a clicked leaf circle.
pub trait LeafClickListener {
    fn on_leaf_clicked(&mut self, country: &Arc<CountryRecord>);
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
    pub text: String,
    /// Baseline offset from the circle center, in canvas units.
    pub offset_y: f64,
    pub font_size: f64,
    pub bold: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub depth: usize,
    pub circle: SceneCircle,
    pub value: f64,
    pub labels: Vec<LabelLine>,
    pub country: Option<Arc<CountryRecord>>,
}

impl SceneNode {
    /// Only country nodes are click targets; a region without countries is
    /// childless but is not one.
    pub fn is_country(&self) -> bool {
        self.country.is_some()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.circle.x;
        let dy = y - self.circle.y;
        self.circle.r > 0.0 && dx * dx + dy * dy <= self.circle.r * self.circle.r
    }
}

/// Everything needed to draw one chart: background, then every node with
/// parents before children.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub metric: Metric,
    pub base_font_size: f64,
    pub background: SceneCircle,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn leaves(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|node| node.is_country())
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Topmost country whose circle contains the point.
    pub fn leaf_at(&self, x: f64, y: f64) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.is_country() && node.contains(x, y))
    }

    /// Reports the country under the point to `listener`; returns whether a
    /// leaf was hit.
    pub fn dispatch_click(&self, x: f64, y: f64, listener: &mut dyn LeafClickListener) -> bool {
        match self.leaf_at(x, y).and_then(|node| node.country.as_ref()) {
            Some(country) => {
                listener.on_leaf_clicked(country);
                true
            }
            None => false,
        }
    }
}

pub fn build_scene(layout: &PackLayout, metric: Metric, config: &ChartConfig) -> Scene {
    let colors = &config.colors;
    let scale = DepthColorScale::new(colors.depth_start, colors.depth_end, colors.depth_domain_max);
    let size = config.canvas.size;

    let nodes = layout
        .circles
        .iter()
        .map(|circle| SceneNode {
            name: circle.name.clone(),
            depth: circle.depth,
            circle: SceneCircle {
                x: circle.x,
                y: circle.y,
                r: circle.r,
                fill: scale.color(circle.depth),
            },
            value: circle.value,
            labels: if circle.country.is_some() {
                leaf_labels(circle, metric, config)
            } else {
                Vec::new()
            },
            country: circle.country.clone(),
        })
        .collect::<Vec<_>>();

    debug!(
        nodes = nodes.len(),
        labelled = nodes.iter().filter(|node| !node.labels.is_empty()).count(),
        metric = metric.label(),
        "built scene"
    );

    Scene {
        size,
        metric,
        base_font_size: config.labels.base_font_size,
        background: SceneCircle {
            x: size / 2.0,
            y: size / 2.0,
            r: size / 2.0,
            fill: colors.background,
        },
        nodes,
    }
}

fn leaf_labels(circle: &LayoutCircle, metric: Metric, config: &ChartConfig) -> Vec<LabelLine> {
    let labels = &config.labels;
    let radius = circle.r;
    if radius <= labels.label_min_radius {
        return Vec::new();
    }

    let max_chars = (radius / labels.chars_per_radius_divisor).floor() as i64;
    let name_font = (radius / labels.name_font_divisor).min(labels.name_font_max);
    let mut offset_y = labels.base_font_size * 0.3;
    let mut lines = Vec::new();

    for (index, text) in wrap_text(&circle.name, max_chars).into_iter().enumerate() {
        offset_y += if index == 0 { -0.5 * name_font } else { name_font };
        lines.push(LabelLine {
            text,
            offset_y,
            font_size: name_font,
            bold: index == 0,
        });
    }

    let value = circle
        .country
        .as_deref()
        .map(|country| metric.value_of(country))
        .unwrap_or(circle.value);
    if value > 0.0 && radius > labels.value_min_radius {
        let value_font = (radius / labels.value_font_divisor).min(labels.value_font_max);
        offset_y += value_font;
        lines.push(LabelLine {
            text: format_metric(metric, value),
            offset_y,
            font_size: value_font,
            bold: false,
        });
    }

    lines
}
