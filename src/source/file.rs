use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use super::{Dataset, Source};
use crate::error::SourceError;

/// Reads `<dir>/<dataset>.json`, one export per dataset. The studio name is
/// not part of the path.
#[derive(Debug, Clone)]
pub(crate) struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(format!("{}.json", dataset.path_name()))
    }
}

impl Source for FileSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn fetch_raw(&self, dataset: Dataset, _studio: &str) -> Result<Value, SourceError> {
        let path = self.path_for(dataset);
        if !path.exists() {
            debug!("No {} file at {}", dataset.path_name(), path.display());
            return Ok(Value::Array(Vec::new()));
        }
        let content = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SourceError::Json {
            origin: path.display().to_string(),
            source,
        })
    }
}
