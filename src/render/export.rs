use std::io;
use std::path::Path;

use svg::Document;
use svg::node::Text as SvgText;
use svg::node::element::{Circle, Group, Text};
use tracing::info;

use super::scene::{Scene, SceneNode};

pub fn to_svg_document(scene: &Scene) -> Document {
    let background = &scene.background;
    let mut document = Document::new()
        .set("viewBox", format!("0 0 {} {}", scene.size, scene.size))
        .set("width", scene.size)
        .set("height", scene.size)
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("font-family", "sans-serif")
        .set("font-size", scene.base_font_size)
        .add(
            Circle::new()
                .set("cx", background.x)
                .set("cy", background.y)
                .set("r", background.r)
                .set("fill", background.fill.to_hex()),
        );

    for node in &scene.nodes {
        document = document.add(node_group(node));
    }
    document
}

fn node_group(node: &SceneNode) -> Group {
    let mut circle = Circle::new()
        .set("r", node.circle.r)
        .set("fill", node.circle.fill.to_hex())
        .set("data-depth", node.depth);
    if node.is_country() {
        circle = circle.set("data-country", node.name.as_str());
    }

    let mut group = Group::new()
        .set(
            "transform",
            format!("translate({},{})", node.circle.x, node.circle.y),
        )
        .add(circle);

    for line in &node.labels {
        let mut text = Text::new("")
            .set("y", line.offset_y)
            .set("font-size", line.font_size)
            .set("text-anchor", "middle")
            .set("pointer-events", "none");
        if line.bold {
            text = text.set("font-weight", "bold");
        }
        group = group.add(text.add(SvgText::new(line.text.clone())));
    }
    group
}

pub fn to_svg_string(scene: &Scene) -> String {
    to_svg_document(scene).to_string()
}

pub fn save_svg(scene: &Scene, path: &Path) -> io::Result<()> {
    let document = to_svg_document(scene);
    svg::save(path, &document)?;
    info!(
        path = %path.display(),
        nodes = scene.nodes.len(),
        metric = scene.metric.label(),
        "exported svg"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ChartConfig;
    use crate::data::{CountryRecord, Metric};
    use crate::hierarchy::HierarchyNode;
    use crate::pack::{PackOptions, pack};
    use crate::render::build_scene;

    fn scene() -> Scene {
        let country = |name: &str, population: u64| HierarchyNode {
            country: Some(Arc::new(CountryRecord {
                name: name.to_owned(),
                population: Some(population),
                ..Default::default()
            })),
            ..HierarchyNode::leaf(name, population as f64)
        };
        let root = HierarchyNode::branch(
            "Europe",
            vec![
                HierarchyNode::branch("West", vec![country("France", 67_000_000)]),
                HierarchyNode::branch("East", vec![country("Poland", 38_000_000)]),
            ],
        );
        build_scene(
            &pack(&root, PackOptions::default()),
            Metric::Population,
            &ChartConfig::default(),
        )
    }

    #[test]
    fn document_has_background_and_one_group_per_node() {
        let svg = to_svg_string(&scene());
        assert!(svg.contains("viewBox=\"0 0 932 932\""));
        assert!(svg.contains("fill=\"#d43d8e\""));
        assert_eq!(svg.matches("<g ").count(), 5);
        assert_eq!(svg.matches("<circle").count(), 6);
    }

    #[test]
    fn leaves_carry_country_names_and_labels() {
        let svg = to_svg_string(&scene());
        assert!(svg.contains("data-country=\"France\""));
        assert!(svg.contains("data-country=\"Poland\""));
        assert!(!svg.contains("data-country=\"West\""));
        assert!(svg.contains("67,000,000"));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn saves_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("europe.svg");
        save_svg(&scene(), &path).expect("svg saved");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<svg"));
        assert!(written.contains("France"));
    }
}
