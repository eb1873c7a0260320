use serde::Serialize;

use crate::consts::UNKNOWN;
use crate::core::types::TableStatusRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TablePerformance {
    pub(crate) table_id: String,
    pub(crate) total_duration: f64,
    pub(crate) active: bool,
}

/// Per-table totals in the order the API listed them
pub(crate) fn table_performance(records: &[TableStatusRecord]) -> Vec<TablePerformance> {
    records
        .iter()
        .map(|r| TablePerformance {
            table_id: r.table_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            total_duration: r.total_duration,
            active: r.status == 1.0,
        })
        .collect()
}
