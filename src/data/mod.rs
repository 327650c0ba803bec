mod load;
mod model;
mod parse;

use std::path::PathBuf;

pub use load::{LoadOutcome, load_dataset, spawn_load};
pub use model::{CountryRecord, Dataset, Metric, Region};
pub use parse::{DATASET_ROOT, parse_dataset};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset document must be a JSON object")]
    NotAnObject,
    #[error("dataset has no `{0}` object of regions")]
    MissingRoot(&'static str),
    #[error("region `{0}` must map to a list of countries")]
    RegionNotArray(String),
    #[error("background load worker disconnected")]
    WorkerDisconnected,
}
