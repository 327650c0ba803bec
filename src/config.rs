//! Chart configuration.
//!
//! Lookup order:
//! 1. explicit `--config` path
//! 2. `EURO_CIRCLES_CONFIG` environment variable
//! 3. built-in defaults
//!
//! Every section is optional in the TOML file; missing keys keep their default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::data::Metric;
use crate::pack::PackOptions;
use crate::render::Rgb;

pub const CONFIG_ENV_VAR: &str = "EURO_CIRCLES_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub canvas: CanvasConfig,
    pub colors: ColorConfig,
    pub labels: LabelConfig,
    pub data: DataConfig,
    pub export: ExportConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Edge length of the square drawing surface.
    pub size: f64,
    /// Gap between sibling circles and between a child and its parent's rim.
    pub padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 932.0,
            padding: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub depth_start: Rgb,
    pub depth_end: Rgb,
    pub depth_domain_max: f64,
    pub background: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            depth_start: Rgb::new(0xfd, 0xe0, 0xdd),
            depth_end: Rgb::new(0xc5, 0x1b, 0x8a),
            depth_domain_max: 5.0,
            background: Rgb::new(0xd4, 0x3d, 0x8e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub base_font_size: f64,
    pub name_font_max: f64,
    pub name_font_divisor: f64,
    pub value_font_max: f64,
    pub value_font_divisor: f64,
    /// Radius per character when computing how many characters fit on a line.
    pub chars_per_radius_divisor: f64,
    pub label_min_radius: f64,
    pub value_min_radius: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            base_font_size: 10.0,
            name_font_max: 14.0,
            name_font_divisor: 4.0,
            value_font_max: 12.0,
            value_font_divisor: 5.0,
            chars_per_radius_divisor: 4.0,
            label_min_radius: 4.0,
            value_min_radius: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    pub metric: Metric,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/data/europe.json"),
            metric: Metric::Population,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub svg_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            svg_path: PathBuf::from("europe.svg"),
        }
    }
}

impl ChartConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        };

        let config = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded chart configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas.size.is_finite() && self.canvas.size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas.size must be positive, got {}",
                self.canvas.size
            )));
        }
        if !(self.canvas.padding.is_finite() && self.canvas.padding >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas.padding must be non-negative, got {}",
                self.canvas.padding
            )));
        }
        if !(self.colors.depth_domain_max > 0.0) {
            return Err(ConfigError::Invalid(
                "colors.depth_domain_max must be positive".to_owned(),
            ));
        }

        let labels = &self.labels;
        for (key, value) in [
            ("labels.name_font_divisor", labels.name_font_divisor),
            ("labels.value_font_divisor", labels.value_font_divisor),
            ("labels.chars_per_radius_divisor", labels.chars_per_radius_divisor),
            ("labels.base_font_size", labels.base_font_size),
            ("labels.name_font_max", labels.name_font_max),
            ("labels.value_font_max", labels.value_font_max),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{key} must be positive")));
            }
        }
        Ok(())
    }

    pub fn pack_options(&self) -> PackOptions {
        PackOptions {
            size: self.canvas.size,
            padding: self.canvas.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_describe_the_stock_chart() {
        let config = ChartConfig::default();
        assert_eq!(config.canvas.size, 932.0);
        assert_eq!(config.canvas.padding, 3.0);
        assert_eq!(config.colors.depth_start.to_hex(), "#fde0dd");
        assert_eq!(config.colors.background.to_hex(), "#d43d8e");
        assert_eq!(config.labels.name_font_max, 14.0);
        assert_eq!(config.data.metric, Metric::Population);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ChartConfig::from_toml(
            r##"
            [canvas]
            padding = 6.0

            [colors]
            depth_end = "#123456"

            [data]
            metric = "land_area"
            "##,
        )
        .expect("valid toml");

        assert_eq!(config.canvas.size, 932.0);
        assert_eq!(config.canvas.padding, 6.0);
        assert_eq!(config.colors.depth_end, Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(config.data.metric, Metric::LandArea);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        assert!(ChartConfig::from_toml("[colors]\nbackground = \"pink\"").is_err());
    }

    #[test]
    fn validation_rejects_degenerate_canvas() {
        let mut config = ChartConfig::default();
        config.canvas.size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ChartConfig::default();
        config.canvas.padding = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validation_rejects_non_positive_font_sizes() {
        let cases: [fn(&mut LabelConfig); 3] = [
            |labels| labels.base_font_size = 0.0,
            |labels| labels.name_font_max = -2.0,
            |labels| labels.value_font_max = f64::NAN,
        ];
        for tweak in cases {
            let mut config = ChartConfig::default();
            tweak(&mut config.labels);
            let Err(ConfigError::Invalid(message)) = config.validate() else {
                panic!("expected font sizes to be rejected");
            };
            assert!(message.starts_with("labels."), "{message}");
        }
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[export]\nsvg_path = \"out/chart.svg\"").expect("write");

        let config = ChartConfig::load(Some(file.path())).expect("config loads");
        assert_eq!(config.export.svg_path, PathBuf::from("out/chart.svg"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ChartConfig::load(Some(Path::new("/no/such/euro-circles.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
