//! Fold raw records into date-keyed buckets
//!
//! Both folds skip bad records one at a time and never fail as a whole.

use chrono::Datelike;
use tracing::{debug, warn};

use crate::core::types::{
    DateBucket, DateKey, FrameRecord, PaymentAggregate, PaymentBucket, PaymentFilter,
    PaymentMode, TopupRecord, UsageAggregate,
};
use crate::utils::{Timezone, business_day};

/// Bucket sums never go below zero; a negative amount counts as 0
fn non_negative(value: f64, field: &'static str) -> f64 {
    if value < 0.0 {
        debug!(field, value, "negative amount treated as zero");
        0.0
    } else {
        value
    }
}

/// Group frames by local calendar date for one month (zero-based) of one year
pub(crate) fn aggregate_usage(
    records: &[FrameRecord],
    month: u32,
    year: i32,
    timezone: Timezone,
) -> UsageAggregate {
    let mut result = UsageAggregate::default();

    for record in records {
        let Some(local) = timezone.to_local_time(record.start_time.as_ref()) else {
            debug!(start_time = ?record.start_time, "skipping frame with invalid start time");
            result.counts.invalid_date += 1;
            continue;
        };

        if local.month0() != month || local.year() != year {
            result.counts.filtered_out += 1;
            continue;
        }

        let date = DateKey::from(local.date_naive());
        let money = non_negative(record.total_money, "TotalMoney");
        result
            .buckets
            .entry(date)
            .or_insert_with(|| DateBucket::new(date))
            .add(non_negative(record.duration, "Duration"), money);
        result.total_money += money;
        result.counts.included += 1;
    }

    debug!(
        included = result.counts.included,
        filtered_out = result.counts.filtered_out,
        invalid = result.counts.invalid_date,
        days = result.buckets.len(),
        "aggregated frames"
    );
    result
}

/// Group top-ups by business day, split into cash and online
pub(crate) fn aggregate_payments(
    records: &[TopupRecord],
    filter: PaymentFilter,
    timezone: Timezone,
) -> PaymentAggregate {
    let mut result = PaymentAggregate::default();

    for record in records {
        let Some(local) = timezone.to_local_time(record.record_date.as_ref()) else {
            debug!(record_date = ?record.record_date, "skipping top-up with invalid record date");
            result.counts.invalid_date += 1;
            continue;
        };

        let day = business_day(&local);
        if !filter.matches(day.date()) {
            result.counts.filtered_out += 1;
            continue;
        }

        let Some(mode) = record.mode.as_deref().and_then(PaymentMode::parse) else {
            warn!(mode = ?record.mode, business_day = %day, "unknown top-up mode");
            result.counts.unknown_mode += 1;
            continue;
        };

        result
            .buckets
            .entry(day)
            .or_insert_with(|| PaymentBucket::new(day))
            .add(mode, non_negative(record.amount, "Amount"));
        result.counts.included += 1;
    }

    debug!(
        included = result.counts.included,
        filtered_out = result.counts.filtered_out,
        invalid = result.counts.invalid_date,
        unknown_mode = result.counts.unknown_mode,
        days = result.buckets.len(),
        "aggregated top-ups"
    );
    result
}
