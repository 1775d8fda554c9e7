//! Implements a struct that holds the state of the REST server.

use std::path::PathBuf;

use crate::dataset::DatasetStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The dataset CSV file and its cached contents.
    pub dataset: DatasetStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] for the dataset at `dataset_path`.
    ///
    /// The dataset is read lazily, so the file does not have to exist when the
    /// server starts. `local_timezone` should be a valid, canonical timezone
    /// name, e.g. "Pacific/Auckland".
    pub fn new(dataset_path: impl Into<PathBuf>, local_timezone: &str) -> Self {
        Self {
            dataset: DatasetStore::new(dataset_path),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
