use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use super::DataError;
use super::model::Dataset;
use super::parse::parse_dataset;

/// Result of one background load, tagged with the pass that requested it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub result: Result<Dataset, DataError>,
}

pub fn load_dataset(path: &Path) -> Result<Dataset, DataError> {
    let started = Instant::now();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&raw)?;

    info!(
        path = %path.display(),
        regions = dataset.regions().len(),
        countries = dataset.country_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded dataset"
    );
    Ok(dataset)
}

pub fn spawn_load(path: PathBuf, generation: u64) -> Receiver<LoadOutcome> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = load_dataset(&path);
        if tx.send(LoadOutcome { generation, result }).is_err() {
            debug!(generation, "load superseded before it finished");
        }
    });

    rx
}
