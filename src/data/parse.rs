use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

use super::DataError;
use super::model::{CountryRecord, Dataset, Region};

pub const DATASET_ROOT: &str = "Europe";

const NAME_KEY: &str = "country";
pub(super) const POPULATION_KEY: &str = "population";
pub(super) const LAND_AREA_KEY: &str = "land_area_km2";
const FLAG_KEY: &str = "flag";
const WIKIPEDIA_KEY: &str = "wikipedia";

pub fn parse_dataset(raw: &str) -> Result<Dataset, DataError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let object = parsed.as_object().ok_or(DataError::NotAnObject)?;
    let regions_value = object
        .get(DATASET_ROOT)
        .ok_or(DataError::MissingRoot(DATASET_ROOT))?;
    let regions_object = regions_value
        .as_object()
        .ok_or(DataError::MissingRoot(DATASET_ROOT))?;

    let mut regions = Vec::with_capacity(regions_object.len());
    for (region_name, countries_value) in regions_object {
        let entries = countries_value
            .as_array()
            .ok_or_else(|| DataError::RegionNotArray(region_name.clone()))?;

        let countries = entries
            .iter()
            .filter_map(|entry| match entry.as_object() {
                Some(fields) => Some(Arc::new(parse_country(region_name, fields))),
                None => {
                    warn!(region = %region_name, "skipping non-object country entry");
                    None
                }
            })
            .collect();

        regions.push(Region {
            name: region_name.clone(),
            countries,
        });
    }

    Ok(Dataset::new(DATASET_ROOT, regions))
}

fn parse_country(region: &str, fields: &Map<String, Value>) -> CountryRecord {
    let name = fields
        .get(NAME_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let population = fields.get(POPULATION_KEY).and_then(|value| {
        let parsed = non_negative_count(value);
        if parsed.is_none() && !value.is_null() {
            warn!(%region, country = %name, ?value, "ignoring invalid population");
        }
        parsed
    });

    let land_area_km2 = fields.get(LAND_AREA_KEY).and_then(|value| {
        let parsed = non_negative_real(value);
        if parsed.is_none() && !value.is_null() {
            warn!(%region, country = %name, ?value, "ignoring invalid land area");
        }
        parsed
    });

    let metadata = fields
        .iter()
        .filter(|(key, _)| {
            !matches!(
                key.as_str(),
                NAME_KEY | POPULATION_KEY | LAND_AREA_KEY | FLAG_KEY | WIKIPEDIA_KEY
            )
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<BTreeMap<_, _>>();

    CountryRecord {
        name,
        population,
        land_area_km2,
        flag: optional_string(fields.get(FLAG_KEY)),
        wikipedia: optional_string(fields.get(WIKIPEDIA_KEY)),
        metadata,
    }
}

fn non_negative_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.is_finite() && *number >= 0.0)
            .map(|number| number.round() as u64)
    })
}

fn non_negative_real(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|number| number.is_finite() && *number >= 0.0)
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_and_known_fields() {
        let raw = r#"{
            "Europe": {
                "West": [
                    {"country": "France", "population": 67000000, "land_area_km2": 551695,
                     "flag": "fr", "wikipedia": "https://en.wikipedia.org/wiki/France",
                     "capital": "Paris"}
                ],
                "East": [
                    {"country": "Poland", "population": 38000000, "land_area_km2": 312696.5}
                ]
            }
        }"#;

        let dataset = parse_dataset(raw).expect("valid dataset");
        let names = dataset
            .regions()
            .iter()
            .map(|region| region.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["West", "East"]);

        let (_, france) = dataset.find_country("France").expect("france");
        assert_eq!(france.population, Some(67_000_000));
        assert_eq!(france.land_area_km2, Some(551_695.0));
        assert_eq!(france.flag.as_deref(), Some("fr"));
        assert_eq!(france.metadata.get("capital"), Some(&Value::from("Paris")));
        assert!(!france.metadata.contains_key("population"));

        let (_, poland) = dataset.find_country("Poland").expect("poland");
        assert_eq!(poland.land_area_km2, Some(312_696.5));
    }

    #[test]
    fn missing_or_invalid_fields_degrade_to_absent() {
        let raw = r#"{"Europe": {"North": [
            {"population": 5},
            {"country": "Iceland", "population": -3, "land_area_km2": "big"},
            {"country": "Norway", "population": null}
        ]}}"#;

        let dataset = parse_dataset(raw).expect("valid dataset");
        let countries = &dataset.regions()[0].countries;
        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0].name, "");
        assert_eq!(countries[0].population, Some(5));
        assert_eq!(countries[1].population, None);
        assert_eq!(countries[1].land_area_km2, None);
        assert_eq!(countries[2].population, None);
    }

    #[test]
    fn rejects_documents_without_dataset_root() {
        assert!(matches!(
            parse_dataset(r#"{"Asia": {}}"#),
            Err(DataError::MissingRoot("Europe"))
        ));
        assert!(matches!(parse_dataset("[1, 2]"), Err(DataError::NotAnObject)));
        assert!(matches!(parse_dataset("{"), Err(DataError::Json(_))));
    }

    #[test]
    fn rejects_regions_that_are_not_lists() {
        let result = parse_dataset(r#"{"Europe": {"South": {"country": "Spain"}}}"#);
        assert!(matches!(result, Err(DataError::RegionNotArray(name)) if name == "South"));
    }
}
