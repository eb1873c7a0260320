//! Single-day detail view

use serde::Serialize;
use std::fmt::Write;

use crate::core::{DateKey, DayOfWeek, PaymentAggregate, Target, UsageAggregate, select_bucket};
use crate::output::format::{NumberFormat, format_amount, format_money};
use crate::utils::{Timezone, day_of_week};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DayDetail {
    pub(crate) date: DateKey,
    pub(crate) day_of_week: DayOfWeek,
    pub(crate) total_duration: Option<f64>,
    pub(crate) total_money: Option<f64>,
    pub(crate) cash: f64,
    pub(crate) online: f64,
}

impl DayDetail {
    pub(crate) fn build(
        usage: &UsageAggregate,
        payments: &PaymentAggregate,
        target: Target,
        timezone: Timezone,
    ) -> Self {
        let date_bucket = select_bucket(&usage.buckets, target, timezone);
        let payment_bucket = select_bucket(&payments.buckets, target, timezone);
        let (date, day) = match target {
            Target::Date(date) => (date, date.day_of_week()),
            Target::Instant(utc) => {
                let local = timezone.to_fixed_offset(utc);
                (DateKey::from(local.date_naive()), day_of_week(&local))
            }
        };
        DayDetail {
            date,
            day_of_week: day,
            total_duration: date_bucket.map(|b| b.total_duration),
            total_money: date_bucket.map(|b| b.total_money),
            cash: payment_bucket.map_or(0.0, |p| p.cash),
            online: payment_bucket.map_or(0.0, |p| p.online),
        }
    }

    pub(crate) fn has_data(&self) -> bool {
        self.total_duration.is_some()
    }

    pub(crate) fn render(&self, currency: &str, nf: NumberFormat) -> String {
        if !self.has_data() {
            return format!("No data available for {}\n", self.date);
        }
        let mut out = format!("Details for {} ({})\n", self.date, self.day_of_week);
        if let (Some(duration), Some(money)) = (self.total_duration, self.total_money) {
            let _ = writeln!(out, "Total Duration: {} minutes", format_amount(duration, nf));
            let _ = writeln!(out, "Total Money: {}", format_money(money, currency, nf));
        }
        let _ = writeln!(out, "Cash Received: {}", format_money(self.cash, currency, nf));
        let _ = writeln!(out, "Online Received: {}", format_money(self.online, currency, nf));
        out
    }
}
