use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::cli::SortOrder;
use crate::core::{DateKey, OccupancySpan, PaymentAggregate, TablePerformance, UsageAggregate};
use crate::output::detail::DayDetail;
use crate::output::format::format_hour;
use crate::output::table::ordered;

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

pub(crate) fn output_usage_json(agg: &UsageAggregate, period: &str, order: SortOrder) -> String {
    let days: Vec<_> = ordered(&agg.buckets, order)
        .into_iter()
        .map(|(_, bucket)| json!(bucket))
        .collect();
    let total_duration: f64 = agg.buckets.values().map(|b| b.total_duration).sum();
    to_pretty(&json!({
        "period": period,
        "total_duration": total_duration,
        "total_money": agg.total_money,
        "days": days,
        "counts": agg.counts,
    }))
}

pub(crate) fn output_payment_json(agg: &PaymentAggregate, scope: &str, order: SortOrder) -> String {
    let days: Vec<_> = ordered(&agg.buckets, order)
        .into_iter()
        .map(|(day, bucket)| {
            json!({
                "business_day": day,
                "cash": bucket.cash,
                "online": bucket.online,
                "total": bucket.total(),
            })
        })
        .collect();
    let (cash, online) = agg.totals();
    to_pretty(&json!({
        "scope": scope,
        "cash": cash,
        "online": online,
        "total": cash + online,
        "days": days,
        "counts": agg.counts,
    }))
}

pub(crate) fn output_detail_json(detail: &DayDetail) -> String {
    to_pretty(&json!(detail))
}

pub(crate) fn output_occupancy_json(
    date: DateKey,
    tables: &BTreeMap<String, Vec<OccupancySpan>>,
) -> String {
    let tables: Vec<_> = tables
        .iter()
        .map(|(table_id, spans)| {
            let spans: Vec<_> = spans
                .iter()
                .map(|s| {
                    json!({
                        "start_hour": s.start_hour,
                        "end_hour": s.end_hour,
                        "from": format_hour(s.start_hour),
                        "to": format_hour(s.end_hour),
                    })
                })
                .collect();
            json!({ "table_id": table_id, "spans": spans })
        })
        .collect();
    to_pretty(&json!({ "date": date, "tables": tables }))
}

pub(crate) fn output_status_json(perf: &[TablePerformance]) -> String {
    to_pretty(&json!(perf))
}
