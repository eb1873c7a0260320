//! Core module - record types, bucketing and aggregation

mod aggregator;
mod filter;
mod lenient;
mod occupancy;
mod tables;
mod types;

pub(crate) use aggregator::{aggregate_payments, aggregate_usage};
pub(crate) use filter::{Target, select_bucket};
pub(crate) use occupancy::{OccupancySpan, table_occupancy};
pub(crate) use tables::{TablePerformance, table_performance};
pub(crate) use types::{
    DateKey, DayOfWeek, FoldCounts, FrameRecord, PaymentAggregate, PaymentFilter,
    TableStatusRecord, TopupRecord, UsageAggregate,
};

#[cfg(test)]
pub(crate) use types::{DateBucket, PaymentBucket, PaymentMode};
