use std::fmt::Write;

use crate::cli::SortOrder;
use crate::core::{PaymentAggregate, TablePerformance, UsageAggregate};
use crate::output::table::ordered;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub(crate) fn output_usage_csv(agg: &UsageAggregate, order: SortOrder) -> String {
    let mut out = String::from("date,day_of_week,total_duration,total_money\n");
    for (date, bucket) in ordered(&agg.buckets, order) {
        let _ = writeln!(
            out,
            "{},{},{:.2},{:.2}",
            date, bucket.day_of_week, bucket.total_duration, bucket.total_money
        );
    }
    out
}

pub(crate) fn output_payment_csv(agg: &PaymentAggregate, order: SortOrder) -> String {
    let mut out = String::from("business_day,total,online,cash\n");
    for (day, bucket) in ordered(&agg.buckets, order) {
        let _ = writeln!(
            out,
            "{},{:.2},{:.2},{:.2}",
            day,
            bucket.total(),
            bucket.online,
            bucket.cash
        );
    }
    out
}

pub(crate) fn output_status_csv(perf: &[TablePerformance]) -> String {
    let mut out = String::from("table_id,total_duration,status\n");
    for row in perf {
        let _ = writeln!(
            out,
            "{},{:.2},{}",
            csv_escape(&row.table_id),
            row.total_duration,
            if row.active { "active" } else { "idle" }
        );
    }
    out
}
