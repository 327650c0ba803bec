use std::path::Path;
use std::sync::Arc;

use euro_circles::config::ChartConfig;
use euro_circles::data::{LoadOutcome, Metric, load_dataset, parse_dataset};
use euro_circles::pipeline::{ChartPipeline, RenderPhase, render_chart};
use euro_circles::render::{LeafClickListener, to_svg_string};
use euro_circles::selection::SelectionState;

const TWO_REGIONS: &str = r#"{"Europe": {
    "West": [{"country": "France", "population": 67000000, "land_area_km2": 551695}],
    "East": [{"country": "Poland", "population": 38000000, "land_area_km2": 312696}]
}}"#;

#[test]
fn france_outweighs_poland_by_population() {
    let dataset = Arc::new(parse_dataset(TWO_REGIONS).expect("dataset parses"));
    let chart = render_chart(dataset, Metric::Population, 1, &ChartConfig::default());
    let layout = &chart.layout;

    let root = layout.root().expect("root");
    assert_eq!(root.name, "Europe");
    let regions = layout.children_of(0).collect::<Vec<_>>();
    let mut region_names = regions.iter().map(|region| region.name.as_str()).collect::<Vec<_>>();
    region_names.sort();
    assert_eq!(region_names, ["East", "West"]);

    for region in ["West", "East"] {
        let index = layout
            .circles
            .iter()
            .position(|circle| circle.name == region)
            .expect("region circle");
        let leaves = layout.children_of(index).filter(|child| child.is_leaf()).count();
        assert_eq!(leaves, 1, "{region} should hold exactly one country");
    }

    let france = layout.find("France").expect("france");
    let poland = layout.find("Poland").expect("poland");
    assert!(france.r > poland.r);
}

#[test]
fn clicking_a_leaf_selects_its_country() {
    let dataset = Arc::new(parse_dataset(TWO_REGIONS).expect("dataset parses"));
    let chart = render_chart(dataset, Metric::LandArea, 1, &ChartConfig::default());
    let poland = chart.scene.node("Poland").expect("poland").circle.clone();

    let mut selection = SelectionState::default();
    assert!(chart.scene.dispatch_click(poland.x, poland.y, &mut selection));
    let selected = selection.current().expect("selected");
    assert_eq!(selected.name, "Poland");
    assert_eq!(selected.land_area_km2, Some(312_696.0));

    selection.close_panel();
    assert!(selection.current().is_none());

    let (region, france) = chart.dataset.find_country("France").expect("france");
    assert_eq!(region.name, "West");
    selection.on_leaf_clicked(france);
    assert_eq!(selection.current().map(|c| c.name.as_str()), Some("France"));
}

#[test]
fn bundled_dataset_renders_every_country() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/europe.json");
    let dataset = load_dataset(&path).expect("bundled dataset loads");
    let countries = dataset.country_count();
    assert!(countries > 40);

    let mut pipeline = ChartPipeline::new(Arc::new(ChartConfig::default()));
    let generation = pipeline.begin(Metric::LandArea);
    assert!(pipeline.complete(LoadOutcome {
        generation,
        result: Ok(dataset),
    }));

    let RenderPhase::Rendered(chart) = pipeline.phase() else {
        panic!("expected a rendered chart");
    };
    assert_eq!(chart.scene.leaves().count(), countries);

    // Kosovo has no land area figure and collapses to a point.
    let kosovo = chart.layout.find("Kosovo").expect("kosovo");
    assert_eq!(kosovo.r, 0.0);

    let svg = to_svg_string(&chart.scene);
    assert_eq!(svg.matches("data-country=").count(), countries);
}

#[test]
fn empty_region_is_not_a_country() {
    let raw = r#"{"Europe": {
        "Ghost": [],
        "West": [{"country": "France", "population": 67000000, "land_area_km2": 551695}]
    }}"#;
    let dataset = Arc::new(parse_dataset(raw).expect("dataset parses"));
    let chart = render_chart(dataset, Metric::Population, 1, &ChartConfig::default());

    let ghost = chart.scene.node("Ghost").expect("ghost region");
    assert!(!ghost.is_country());
    assert_eq!(ghost.value, 0.0);
    assert!(ghost.labels.is_empty());

    let leaves = chart.scene.leaves().map(|node| node.name.as_str()).collect::<Vec<_>>();
    assert_eq!(leaves, ["France"]);

    let svg = to_svg_string(&chart.scene);
    assert_eq!(svg.matches("data-country=").count(), 1);
    assert!(!svg.contains(r#"data-country="Ghost""#));

    let mut selection = SelectionState::default();
    chart
        .scene
        .dispatch_click(ghost.circle.x, ghost.circle.y, &mut selection);
    assert!(selection.current().is_none_or(|country| country.name == "France"));
}
