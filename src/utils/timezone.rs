use chrono::offset::Offset;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::str::FromStr;

use crate::consts::{BUSINESS_DAY_START_HOUR, DATE_FORMAT, DEFAULT_OFFSET_SECS};
use crate::core::{DateKey, DayOfWeek};
use crate::error::AppError;

/// Timestamp exactly as the API delivered it
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawTimestamp {
    Text(String),
    EpochMillis(f64),
}

impl RawTimestamp {
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RawTimestamp::Text(s)),
            Value::Number(n) => n.as_f64().map(RawTimestamp::EpochMillis),
            _ => None,
        }
    }

    /// Parse into a UTC instant. Offset-less forms are read as UTC.
    pub(crate) fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::EpochMillis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(*ms as i64)
            }
            RawTimestamp::EpochMillis(_) => None,
            RawTimestamp::Text(s) => parse_text_instant(s.trim()),
        }
    }
}

fn parse_text_instant(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Civil-time zone the studio reports in
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Timezone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Fixed(FixedOffset::east_opt(DEFAULT_OFFSET_SECS).unwrap_or_else(|| Utc.fix()))
    }
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("ist") {
            return Ok(Timezone::default());
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        if trimmed.starts_with(['+', '-']) {
            return parse_fixed_offset(trimmed)
                .map(Timezone::Fixed)
                .ok_or_else(|| AppError::InvalidTimezone {
                    input: trimmed.to_string(),
                });
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Fixed(offset) => utc.with_timezone(&offset),
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Local civil time for a raw timestamp; `None` when missing or unparseable
    pub(crate) fn to_local_time(
        self,
        raw: Option<&RawTimestamp>,
    ) -> Option<DateTime<FixedOffset>> {
        raw.and_then(RawTimestamp::to_utc)
            .map(|utc| self.to_fixed_offset(utc))
    }

    pub(crate) fn today(self) -> NaiveDate {
        self.to_fixed_offset(Utc::now()).date_naive()
    }
}

/// Parse "+05:30", "-0400" or "+5" into a fixed offset
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = if digits.len() <= 2 {
        (digits.parse::<i32>().ok()?, 0)
    } else {
        let split = digits.len() - 2;
        (
            digits[..split].parse::<i32>().ok()?,
            digits[split..].parse::<i32>().ok()?,
        )
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

pub(crate) fn day_of_week(local: &DateTime<FixedOffset>) -> DayOfWeek {
    DayOfWeek::from(local.weekday())
}

/// Trading day of a local time: hours before the opening hour belong to the
/// previous calendar date.
pub(crate) fn business_day(local: &DateTime<FixedOffset>) -> DateKey {
    let date = local.date_naive();
    if local.hour() < BUSINESS_DAY_START_HOUR {
        DateKey::from(date.pred_opt().unwrap_or(date))
    } else {
        DateKey::from(date)
    }
}
