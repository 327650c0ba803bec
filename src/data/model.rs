use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::parse::{LAND_AREA_KEY, POPULATION_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Population,
    LandArea,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Population, Metric::LandArea];

    pub fn label(self) -> &'static str {
        match self {
            Self::Population => "Population",
            Self::LandArea => "Land area",
        }
    }

    pub fn json_key(self) -> &'static str {
        match self {
            Self::Population => POPULATION_KEY,
            Self::LandArea => LAND_AREA_KEY,
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::Population => None,
            Self::LandArea => Some("km²"),
        }
    }

    /// Value used to size a country's circle. Missing figures count as 0 so the
    /// country still shows up as a point instead of failing the whole draw.
    pub fn value_of(self, country: &CountryRecord) -> f64 {
        match self {
            Self::Population => country.population.map(|value| value as f64),
            Self::LandArea => country.land_area_km2,
        }
        .unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub population: Option<u64>,
    pub land_area_km2: Option<f64>,
    pub flag: Option<String>,
    pub wikipedia: Option<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl CountryRecord {
    pub fn density_per_km2(&self) -> Option<f64> {
        let population = self.population? as f64;
        let area = self.land_area_km2.filter(|area| *area > 0.0)?;
        Some(population / area)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub name: String,
    pub countries: Vec<Arc<CountryRecord>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub(super) name: String,
    pub(super) regions: Vec<Region>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, regions: Vec<Region>) -> Self {
        Self {
            name: name.into(),
            regions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn country_count(&self) -> usize {
        self.regions.iter().map(|region| region.countries.len()).sum()
    }

    pub fn find_country(&self, name: &str) -> Option<(&Region, &Arc<CountryRecord>)> {
        self.regions.iter().find_map(|region| {
            region
                .countries
                .iter()
                .find(|country| country.name == name)
                .map(|country| (region, country))
        })
    }

    /// Region holding this exact record; names are not unique across regions.
    pub fn region_of(&self, country: &Arc<CountryRecord>) -> Option<&Region> {
        self.regions.iter().find(|region| {
            region
                .countries
                .iter()
                .any(|candidate| Arc::ptr_eq(candidate, country))
        })
    }

    pub fn total(&self, metric: Metric) -> f64 {
        self.regions
            .iter()
            .flat_map(|region| region.countries.iter())
            .map(|country| metric.value_of(country))
            .sum()
    }
}
