//! Per-table occupancy for one local date

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::consts::UNKNOWN;
use crate::core::types::{DateKey, FrameRecord};
use crate::utils::Timezone;

/// A stretch of play on one table, in fractional local hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct OccupancySpan {
    pub(crate) start_hour: f64,
    pub(crate) end_hour: f64,
}

impl OccupancySpan {
    pub(crate) fn hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }
}

fn fractional_hour(t: NaiveDateTime) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Frames still running (no off time) are treated as ending at `now`.
pub(crate) fn table_occupancy(
    frames: &[FrameRecord],
    date: DateKey,
    now: DateTime<Utc>,
    timezone: Timezone,
) -> BTreeMap<String, Vec<OccupancySpan>> {
    let mut tables: BTreeMap<String, Vec<OccupancySpan>> = BTreeMap::new();
    let day_start = date.date().and_time(NaiveTime::MIN);
    let Some(day_end) = date.date().and_hms_opt(23, 59, 59) else {
        return tables;
    };

    for frame in frames {
        let Some(start) = timezone.to_local_time(frame.start_time.as_ref()) else {
            debug!(start_time = ?frame.start_time, "skipping frame with invalid start time");
            continue;
        };
        let end = timezone
            .to_local_time(frame.off_time.as_ref())
            .unwrap_or_else(|| timezone.to_fixed_offset(now));

        let start = start.naive_local().max(day_start);
        let end = end.naive_local().min(day_end);
        if end <= start {
            continue;
        }

        let table_id = frame.table_id.clone().unwrap_or_else(|| UNKNOWN.to_string());
        tables.entry(table_id).or_default().push(OccupancySpan {
            start_hour: fractional_hour(start),
            end_hour: fractional_hour(end),
        });
    }

    for spans in tables.values_mut() {
        spans.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));
    }
    tables
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::utils::RawTimestamp;

    fn frame(table: Option<&str>, start: &str, off: Option<&str>) -> FrameRecord {
        FrameRecord {
            start_time: Some(RawTimestamp::Text(start.to_string())),
            off_time: off.map(|s| RawTimestamp::Text(s.to_string())),
            table_id: table.map(str::to_string),
            ..Default::default()
        }
    }

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-03-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn span_within_the_day() {
        // 10:00 -> 11:30 local
        let frames = vec![frame(Some("1"), "2024-03-10T04:30:00Z", Some("2024-03-10T06:00:00Z"))];
        let occ = table_occupancy(&frames, key("2024-03-10"), now(), Timezone::default());
        assert_eq!(
            occ["1"],
            vec![OccupancySpan {
                start_hour: 10.0,
                end_hour: 11.5,
            }]
        );
        assert_eq!(occ["1"][0].hours(), 1.5);
    }

    #[test]
    fn spans_are_clipped_to_the_day() {
        // 2024-03-09 23:00 -> 2024-03-10 01:00 local
        let frames = vec![
            frame(Some("2"), "2024-03-09T17:30:00Z", Some("2024-03-09T19:30:00Z")),
            // 2024-03-10 23:30 -> 2024-03-11 00:30 local
            frame(Some("3"), "2024-03-10T18:00:00Z", Some("2024-03-10T19:00:00Z")),
        ];
        let occ = table_occupancy(&frames, key("2024-03-10"), now(), Timezone::default());
        assert_eq!(occ["2"][0].start_hour, 0.0);
        assert_eq!(occ["2"][0].end_hour, 1.0);
        assert_eq!(occ["3"][0].start_hour, 23.5);
        assert_eq!(occ["3"][0].end_hour, 23.0 + 59.0 / 60.0);
    }

    #[test]
    fn frames_on_other_days_are_dropped() {
        let frames = vec![frame(Some("1"), "2024-03-08T04:30:00Z", Some("2024-03-08T06:00:00Z"))];
        let occ = table_occupancy(&frames, key("2024-03-10"), now(), Timezone::default());
        assert!(occ.is_empty());
    }

    #[test]
    fn open_frames_run_until_now() {
        // 16:00 local start, now is 17:30 local
        let frames = vec![frame(Some("4"), "2024-03-10T10:30:00Z", None)];
        let occ = table_occupancy(&frames, key("2024-03-10"), now(), Timezone::default());
        assert_eq!(
            occ["4"],
            vec![OccupancySpan {
                start_hour: 16.0,
                end_hour: 17.5,
            }]
        );
    }

    #[test]
    fn spans_sorted_and_missing_table_grouped() {
        let frames = vec![
            frame(None, "2024-03-10T08:30:00Z", Some("2024-03-10T09:30:00Z")),
            frame(None, "2024-03-10T04:30:00Z", Some("2024-03-10T05:30:00Z")),
            frame(Some("9"), "bad", Some("2024-03-10T05:30:00Z")),
        ];
        let occ = table_occupancy(&frames, key("2024-03-10"), now(), Timezone::default());
        assert_eq!(occ.len(), 1);
        let spans = &occ[UNKNOWN];
        assert_eq!(spans[0].start_hour, 10.0);
        assert_eq!(spans[1].start_hour, 14.0);
    }
}
