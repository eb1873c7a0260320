//! Core data types
//!
//! Raw API records and the typed buckets they fold into.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::consts::DATE_FORMAT;
use crate::core::lenient;
use crate::error::AppError;
use crate::utils::{RawTimestamp, parse_date};

/// Validated calendar date used as a bucket key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct DateKey(NaiveDate);

impl DateKey {
    pub(crate) fn parse(s: &str) -> Result<Self, AppError> {
        parse_date(s).map(DateKey)
    }

    pub(crate) fn date(self) -> NaiveDate {
        self.0
    }

    pub(crate) fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from(self.0.weekday())
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl FromStr for DateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKey::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub(crate) enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One frame (session) played on one table
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FrameRecord {
    #[serde(rename = "StartTime", default, deserialize_with = "lenient::timestamp")]
    pub(crate) start_time: Option<RawTimestamp>,
    #[serde(rename = "OffTime", default, deserialize_with = "lenient::timestamp")]
    pub(crate) off_time: Option<RawTimestamp>,
    /// Minutes
    #[serde(rename = "Duration", default, deserialize_with = "lenient::number")]
    pub(crate) duration: f64,
    #[serde(rename = "TotalMoney", default, deserialize_with = "lenient::number")]
    pub(crate) total_money: f64,
    #[serde(rename = "TableId", default, deserialize_with = "lenient::text")]
    pub(crate) table_id: Option<String>,
}

/// One top-up (payment) transaction
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TopupRecord {
    #[serde(rename = "RecordDate", default, deserialize_with = "lenient::timestamp")]
    pub(crate) record_date: Option<RawTimestamp>,
    #[serde(rename = "Amount", default, deserialize_with = "lenient::number")]
    pub(crate) amount: f64,
    #[serde(rename = "Mode", default, deserialize_with = "lenient::text")]
    pub(crate) mode: Option<String>,
}

/// Current state of one table
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TableStatusRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub(crate) table_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub(crate) total_duration: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub(crate) status: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaymentMode {
    Cash,
    Online,
}

impl PaymentMode {
    /// Case- and whitespace-insensitive match on "cash" / "online"
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMode::Cash),
            "online" => Some(PaymentMode::Online),
            _ => None,
        }
    }
}

/// Usage totals for one local calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DateBucket {
    pub(crate) date: DateKey,
    pub(crate) day_of_week: DayOfWeek,
    pub(crate) total_duration: f64,
    pub(crate) total_money: f64,
}

impl DateBucket {
    pub(crate) fn new(date: DateKey) -> Self {
        DateBucket {
            date,
            day_of_week: date.day_of_week(),
            total_duration: 0.0,
            total_money: 0.0,
        }
    }

    pub(crate) fn add(&mut self, duration: f64, money: f64) {
        self.total_duration += duration;
        self.total_money += money;
    }
}

/// Payment totals for one business day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PaymentBucket {
    pub(crate) business_day: DateKey,
    pub(crate) cash: f64,
    pub(crate) online: f64,
}

impl PaymentBucket {
    pub(crate) fn new(business_day: DateKey) -> Self {
        PaymentBucket {
            business_day,
            cash: 0.0,
            online: 0.0,
        }
    }

    pub(crate) fn add(&mut self, mode: PaymentMode, amount: f64) {
        match mode {
            PaymentMode::Cash => self.cash += amount,
            PaymentMode::Online => self.online += amount,
        }
    }

    pub(crate) fn total(&self) -> f64 {
        self.cash + self.online
    }
}

/// Which business days a payment fold keeps. Months are zero-based
/// (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaymentFilter {
    MonthYear { month: u32, year: i32 },
    Month { month: u32 },
    All,
}

impl PaymentFilter {
    pub(crate) fn matches(self, date: NaiveDate) -> bool {
        match self {
            PaymentFilter::MonthYear { month, year } => {
                date.month0() == month && date.year() == year
            }
            PaymentFilter::Month { month } => date.month0() == month,
            PaymentFilter::All => true,
        }
    }
}

/// What happened to each record during a fold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct FoldCounts {
    pub(crate) included: usize,
    pub(crate) filtered_out: usize,
    pub(crate) invalid_date: usize,
    pub(crate) unknown_mode: usize,
}

impl FoldCounts {
    pub(crate) fn skipped(&self) -> usize {
        self.invalid_date + self.unknown_mode
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UsageAggregate {
    pub(crate) buckets: BTreeMap<DateKey, DateBucket>,
    pub(crate) total_money: f64,
    pub(crate) counts: FoldCounts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PaymentAggregate {
    pub(crate) buckets: BTreeMap<DateKey, PaymentBucket>,
    pub(crate) counts: FoldCounts,
}

impl PaymentAggregate {
    /// (cash, online) across every bucket
    pub(crate) fn totals(&self) -> (f64, f64) {
        self.buckets
            .values()
            .fold((0.0, 0.0), |(cash, online), b| (cash + b.cash, online + b.online))
    }
}
