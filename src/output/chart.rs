//! Chart.js-shaped bar chart configs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{DateKey, DayOfWeek, OccupancySpan, TablePerformance, UsageAggregate};

const SUNDAY_FILL: &str = "rgba(255, 99, 132, 0.2)";
const SUNDAY_BORDER: &str = "rgba(255, 99, 132, 1)";
const WEEKDAY_FILL: &str = "rgba(75, 192, 192, 0.2)";
const WEEKDAY_BORDER: &str = "rgba(75, 192, 192, 1)";
const MONEY_FILL: &str = "rgba(153, 102, 255, 0.2)";
const MONEY_BORDER: &str = "rgba(153, 102, 255, 1)";
const TABLE_ACTIVE: &str = "#01AB7A";
const TABLE_IDLE: &str = "#CCCCCC";

/// One color for the whole dataset, or one per bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum Colors {
    Single(String),
    PerBar(Vec<String>),
}

/// A floating bar from `y[0]` to `y[1]` at category `x`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RangePoint {
    pub(crate) x: String,
    pub(crate) y: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum Points {
    Values(Vec<f64>),
    Ranges(Vec<RangePoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dataset {
    pub(crate) label: String,
    pub(crate) data: Points,
    pub(crate) background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) border_color: Option<Colors>,
    pub(crate) border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChartData {
    pub(crate) labels: Vec<String>,
    pub(crate) datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChartConfig {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
    pub(crate) data: ChartData,
}

impl ChartConfig {
    fn bar(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        ChartConfig {
            kind: "bar",
            data: ChartData { labels, datasets },
        }
    }

    pub(crate) fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "null".to_string())
    }
}

fn bar_colors(sundays: &[bool], sunday: &str, other: &str) -> Colors {
    Colors::PerBar(
        sundays
            .iter()
            .map(|&is_sunday| (if is_sunday { sunday } else { other }).to_string())
            .collect(),
    )
}

/// Duration and money per day, Sunday bars highlighted
pub(crate) fn usage_chart(agg: &UsageAggregate) -> ChartConfig {
    let buckets: Vec<_> = agg.buckets.values().collect();
    let sundays: Vec<bool> = buckets
        .iter()
        .map(|b| b.day_of_week == DayOfWeek::Sunday)
        .collect();

    ChartConfig::bar(
        buckets.iter().map(|b| b.date.to_string()).collect(),
        vec![
            Dataset {
                label: "Total Duration (minutes)".to_string(),
                data: Points::Values(buckets.iter().map(|b| b.total_duration).collect()),
                background_color: bar_colors(&sundays, SUNDAY_FILL, WEEKDAY_FILL),
                border_color: Some(bar_colors(&sundays, SUNDAY_BORDER, WEEKDAY_BORDER)),
                border_width: 1,
            },
            Dataset {
                label: "Total Money".to_string(),
                data: Points::Values(buckets.iter().map(|b| b.total_money).collect()),
                background_color: Colors::Single(MONEY_FILL.to_string()),
                border_color: Some(Colors::Single(MONEY_BORDER.to_string())),
                border_width: 1,
            },
        ],
    )
}

pub(crate) fn tables_chart(perf: &[TablePerformance]) -> ChartConfig {
    ChartConfig::bar(
        perf.iter().map(|p| p.table_id.clone()).collect(),
        vec![Dataset {
            label: "Table's Performance".to_string(),
            data: Points::Values(perf.iter().map(|p| p.total_duration).collect()),
            background_color: Colors::PerBar(
                perf.iter()
                    .map(|p| (if p.active { TABLE_ACTIVE } else { TABLE_IDLE }).to_string())
                    .collect(),
            ),
            border_color: None,
            border_width: 1,
        }],
    )
}

/// Red channel for the nth table, spread over 0..255
fn table_red(index: usize) -> usize {
    (index * 67) % 256
}

/// One floating-bar dataset per table: each span runs from its start hour
/// to its end hour on the date's column.
pub(crate) fn occupancy_chart(
    date: DateKey,
    tables: &BTreeMap<String, Vec<OccupancySpan>>,
) -> ChartConfig {
    let label = date.to_string();
    let datasets = tables
        .iter()
        .enumerate()
        .map(|(index, (table_id, spans))| {
            let red = table_red(index);
            Dataset {
                label: format!("Table {table_id}"),
                data: Points::Ranges(
                    spans
                        .iter()
                        .map(|span| RangePoint {
                            x: label.clone(),
                            y: [span.start_hour, span.end_hour],
                        })
                        .collect(),
                ),
                background_color: Colors::Single(format!("rgba({red}, 99, 132, 0.5)")),
                border_color: Some(Colors::Single(format!("rgba({red}, 99, 132, 1)"))),
                border_width: 1,
            }
        })
        .collect();
    ChartConfig::bar(vec![label], datasets)
}

/// Holds at most one live chart. Replacing drops the old chart before
/// the new one is installed.
#[derive(Debug)]
pub(crate) struct ChartSlot<T> {
    current: Option<T>,
}

impl<T> Default for ChartSlot<T> {
    fn default() -> Self {
        ChartSlot { current: None }
    }
}

impl<T> ChartSlot<T> {
    pub(crate) fn replace(&mut self, chart: T) -> &T {
        drop(self.current.take());
        self.current.insert(chart)
    }
}
