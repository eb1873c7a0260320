//! Single-bucket lookup for the detail view

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::core::types::{DateBucket, DateKey, PaymentBucket};
use crate::utils::{Timezone, business_day};

/// A bucket kind knows how an instant maps onto its key
pub(crate) trait Bucket {
    fn key_for_local(local: &DateTime<FixedOffset>) -> DateKey;
}

impl Bucket for DateBucket {
    fn key_for_local(local: &DateTime<FixedOffset>) -> DateKey {
        DateKey::from(local.date_naive())
    }
}

impl Bucket for PaymentBucket {
    fn key_for_local(local: &DateTime<FixedOffset>) -> DateKey {
        business_day(local)
    }
}

/// What the user picked
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target {
    /// A calendar date, used as the key as-is
    Date(DateKey),
    /// A moment in time, keyed through the zone
    Instant(DateTime<Utc>),
}

impl Target {
    fn key<B: Bucket>(self, timezone: Timezone) -> DateKey {
        match self {
            Target::Date(date) => date,
            Target::Instant(utc) => B::key_for_local(&timezone.to_fixed_offset(utc)),
        }
    }
}

pub(crate) fn select_bucket<B: Bucket>(
    buckets: &BTreeMap<DateKey, B>,
    target: Target,
    timezone: Timezone,
) -> Option<&B> {
    let key = target.key::<B>(timezone);
    let found = buckets.get(&key);
    if found.is_none() {
        debug!(%key, "no bucket for selected date");
    }
    found
}
