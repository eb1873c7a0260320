use comfy_table::{Cell, Color, Table};
use std::collections::BTreeMap;

use crate::cli::SortOrder;
use crate::core::{
    DateKey, FoldCounts, OccupancySpan, PaymentAggregate, TablePerformance, UsageAggregate,
};
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, format_hour, format_money, header_cell,
    right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions<'a> {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
    pub(crate) currency: &'a str,
}

impl TableOptions<'_> {
    fn total_color(&self) -> Option<Color> {
        if self.use_color { Some(Color::Cyan) } else { None }
    }

    fn money_color(&self) -> Option<Color> {
        if self.use_color { Some(Color::Green) } else { None }
    }
}

pub(super) fn ordered<V>(map: &BTreeMap<DateKey, V>, order: SortOrder) -> Vec<(&DateKey, &V)> {
    match order {
        SortOrder::Asc => map.iter().collect(),
        SortOrder::Desc => map.iter().rev().collect(),
    }
}

/// Print the summary line with record counts
fn print_summary_line(counts: &FoldCounts, use_color: bool) {
    let mut text = format!("{} records counted", counts.included);
    if counts.filtered_out > 0 {
        text.push_str(&format!(", {} outside the period", counts.filtered_out));
    }
    if counts.skipped() > 0 {
        text.push_str(&format!(", {} skipped", counts.skipped()));
    }
    if use_color && counts.skipped() > 0 {
        println!("\n  \x1b[33m{text}\x1b[0m\n");
    } else {
        println!("\n  {text}\n");
    }
}

pub(super) fn usage_table(agg: &UsageAggregate, opts: &TableOptions<'_>) -> Table {
    let c = opts.use_color;
    let nf = opts.number_format;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", c),
        header_cell("Day", c),
        header_cell("Duration (min)", c),
        header_cell("Money", c),
    ]);

    let mut total_duration = 0.0;
    for (date, bucket) in ordered(&agg.buckets, opts.order) {
        total_duration += bucket.total_duration;
        table.add_row(vec![
            Cell::new(date.to_string()),
            Cell::new(bucket.day_of_week.name()),
            right_cell(&format_amount(bucket.total_duration, nf), None, false),
            right_cell(
                &format_money(bucket.total_money, opts.currency, nf),
                opts.money_color(),
                false,
            ),
        ]);
    }

    table.add_row(vec![
        styled_cell("TOTAL", opts.total_color(), true),
        Cell::new(""),
        right_cell(&format_amount(total_duration, nf), opts.total_color(), true),
        right_cell(
            &format_money(agg.total_money, opts.currency, nf),
            opts.money_color(),
            true,
        ),
    ]);
    table
}

pub(crate) fn print_usage_table(title: &str, agg: &UsageAggregate, opts: &TableOptions<'_>) {
    println!("\n  {title}\n");
    println!("{}", usage_table(agg, opts));
    print_summary_line(&agg.counts, opts.use_color);
}

pub(super) fn payment_table(agg: &PaymentAggregate, opts: &TableOptions<'_>) -> Table {
    let c = opts.use_color;
    let nf = opts.number_format;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Business Day", c),
        header_cell("Total", c),
        header_cell("Online", c),
        header_cell("Cash", c),
    ]);

    for (day, bucket) in ordered(&agg.buckets, opts.order) {
        table.add_row(vec![
            Cell::new(day.to_string()),
            right_cell(
                &format_money(bucket.total(), opts.currency, nf),
                opts.money_color(),
                false,
            ),
            right_cell(&format_money(bucket.online, opts.currency, nf), None, false),
            right_cell(&format_money(bucket.cash, opts.currency, nf), None, false),
        ]);
    }

    let (cash, online) = agg.totals();
    table.add_row(vec![
        styled_cell("TOTAL", opts.total_color(), true),
        right_cell(
            &format_money(cash + online, opts.currency, nf),
            opts.money_color(),
            true,
        ),
        right_cell(&format_money(online, opts.currency, nf), opts.total_color(), true),
        right_cell(&format_money(cash, opts.currency, nf), opts.total_color(), true),
    ]);
    table
}

pub(crate) fn print_payment_table(title: &str, agg: &PaymentAggregate, opts: &TableOptions<'_>) {
    println!("\n  {title}\n");
    println!("{}", payment_table(agg, opts));
    print_summary_line(&agg.counts, opts.use_color);
}

pub(super) fn occupancy_table(
    tables: &BTreeMap<String, Vec<OccupancySpan>>,
    opts: &TableOptions<'_>,
) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Table", c),
        header_cell("From", c),
        header_cell("To", c),
        header_cell("Hours", c),
    ]);

    let mut total_hours = 0.0;
    for (table_id, spans) in tables {
        for (i, span) in spans.iter().enumerate() {
            total_hours += span.hours();
            table.add_row(vec![
                Cell::new(if i == 0 { table_id.as_str() } else { "" }),
                right_cell(&format_hour(span.start_hour), None, false),
                right_cell(&format_hour(span.end_hour), None, false),
                right_cell(&format_amount(span.hours(), opts.number_format), None, false),
            ]);
        }
    }

    table.add_row(vec![
        styled_cell("TOTAL", opts.total_color(), true),
        Cell::new(""),
        Cell::new(""),
        right_cell(
            &format_amount(total_hours, opts.number_format),
            opts.total_color(),
            true,
        ),
    ]);
    table
}

pub(crate) fn print_occupancy_table(
    title: &str,
    tables: &BTreeMap<String, Vec<OccupancySpan>>,
    opts: &TableOptions<'_>,
) {
    println!("\n  {title}\n");
    println!("{}", occupancy_table(tables, opts));
}

pub(super) fn status_table(perf: &[TablePerformance], opts: &TableOptions<'_>) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Table", c),
        header_cell("Duration", c),
        header_cell("Status", c),
    ]);
    for row in perf {
        let status = if row.active {
            styled_cell("Active", opts.money_color(), true)
        } else {
            Cell::new("Idle")
        };
        table.add_row(vec![
            Cell::new(&row.table_id),
            right_cell(&format_amount(row.total_duration, opts.number_format), None, false),
            status,
        ]);
    }
    table
}

pub(crate) fn print_status_table(title: &str, perf: &[TablePerformance], opts: &TableOptions<'_>) {
    println!("\n  {title}\n");
    println!("{}", status_table(perf, opts));
}
