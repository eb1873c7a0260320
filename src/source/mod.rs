//! Record source abstraction layer
//!
//! A source hands back the raw JSON body for one dataset of one studio.
//! Everything above this layer sees typed records, and any failure
//! degrades to an empty list.

pub(crate) mod file;
pub(crate) mod http;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{FrameRecord, TableStatusRecord, TopupRecord};
use crate::error::SourceError;

pub(crate) use file::FileSource;
pub(crate) use http::HttpSource;

/// Datasets exposed by the studio API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dataset {
    Frames,
    Topup,
    TableStatus,
}

impl Dataset {
    /// Path segment (and file stem) for this dataset
    pub(crate) fn path_name(self) -> &'static str {
        match self {
            Dataset::Frames => "frames",
            Dataset::Topup => "topup",
            Dataset::TableStatus => "tabledets",
        }
    }
}

pub(crate) trait Source {
    /// Short description for log lines
    fn describe(&self) -> String;

    /// Raw response body for one dataset
    fn fetch_raw(&self, dataset: Dataset, studio: &str) -> Result<Value, SourceError>;
}

/// Unwrap the record list. The API nests it as the first element of the
/// outer array; a flat array of objects is taken as-is.
fn extract_records(body: Value, origin: &str) -> Result<Vec<Value>, SourceError> {
    let Value::Array(mut items) = body else {
        return Err(SourceError::UnexpectedShape {
            origin: origin.to_string(),
            detail: "expected a JSON array".to_string(),
        });
    };
    if items.is_empty() {
        return Ok(items);
    }
    if matches!(items.first(), Some(Value::Array(_))) {
        return match items.swap_remove(0) {
            Value::Array(records) => Ok(records),
            _ => Ok(Vec::new()),
        };
    }
    Ok(items)
}

fn fetch_records<T: DeserializeOwned>(
    source: &dyn Source,
    dataset: Dataset,
    studio: &str,
) -> Vec<T> {
    let origin = format!("{} {}", source.describe(), dataset.path_name());
    let body = match source.fetch_raw(dataset, studio) {
        Ok(body) => body,
        Err(err) => {
            warn!("{err}");
            return Vec::new();
        }
    };
    let items = match extract_records(body, &origin) {
        Ok(items) => items,
        Err(err) => {
            warn!("{err}");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        // serde would fill a struct from an array by position
        if !item.is_object() {
            debug!(%origin, index, "skipping non-object record");
            continue;
        }
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(err) => debug!(%origin, index, "skipping malformed record: {err}"),
        }
    }
    debug!(%origin, count = records.len(), "fetched records");
    records
}

pub(crate) fn fetch_usage(source: &dyn Source, studio: &str) -> Vec<FrameRecord> {
    fetch_records(source, Dataset::Frames, studio)
}

pub(crate) fn fetch_payments(source: &dyn Source, studio: &str) -> Vec<TopupRecord> {
    fetch_records(source, Dataset::Topup, studio)
}

pub(crate) fn fetch_table_status(source: &dyn Source, studio: &str) -> Vec<TableStatusRecord> {
    fetch_records(source, Dataset::TableStatus, studio)
}
