use chrono::{Datelike, NaiveDate, Utc};

use crate::cli::commands::PaymentScope;
use crate::cli::{Cli, Commands, SortOrder};
use crate::consts::DEFAULT_CURRENCY;
use crate::core::{
    DateKey, PaymentFilter, Target, aggregate_payments, aggregate_usage, table_occupancy,
    table_performance,
};
use crate::error::AppError;
use crate::output::{
    ChartConfig, ChartSlot, DayDetail, NumberFormat, TableOptions, occupancy_chart,
    output_detail_json, output_occupancy_json, output_payment_csv, output_payment_json,
    output_status_csv, output_status_json, output_usage_csv, output_usage_json,
    print_occupancy_table, print_payment_table, print_status_table, print_usage_table,
    tables_chart, usage_chart,
};
use crate::source::{Source, fetch_payments, fetch_table_status, fetch_usage};
use crate::utils::Timezone;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) source: &'a dyn Source,
    pub(crate) studio: &'a str,
    pub(crate) timezone: Timezone,
    pub(crate) number_format: NumberFormat,
    /// Zero-based month of the reporting period
    pub(crate) month0: u32,
    pub(crate) year: i32,
    pub(crate) date: DateKey,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions<'_> {
        TableOptions {
            order: self.sort_order(),
            use_color: self.cli.use_color(),
            number_format: self.number_format,
            currency: self.cli.currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
        }
    }

    fn sort_order(&self) -> SortOrder {
        self.cli.order
    }

    /// "2024-03"
    fn period_label(&self) -> String {
        format!("{}-{:02}", self.year, self.month0 + 1)
    }

    /// "March 2024"
    fn period_title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.period_label())
    }
}

/// Month (zero-based) and year of the reporting period. Missing parts come
/// from `fallback`.
pub(crate) fn resolve_period(
    month: Option<u32>,
    year: Option<i32>,
    fallback: NaiveDate,
) -> Result<(u32, i32), AppError> {
    let month0 = match month {
        Some(m @ 1..=12) => m - 1,
        Some(m) => return Err(AppError::InvalidMonth { input: m }),
        None => fallback.month0(),
    };
    Ok((month0, year.unwrap_or_else(|| fallback.year())))
}

fn print_chart(slot: &mut ChartSlot<ChartConfig>, chart: ChartConfig) {
    println!("{}", slot.replace(chart).to_json());
}

fn unsupported(format: &str, view: &str) {
    println!("{format} output is not available for the {view} view.");
}

fn handle_frames(ctx: &CommandContext<'_>, charts: &mut ChartSlot<ChartConfig>) {
    let frames = fetch_usage(ctx.source, ctx.studio);
    let agg = aggregate_usage(&frames, ctx.month0, ctx.year, ctx.timezone);
    if agg.buckets.is_empty() {
        println!("No frame data found for {}.", ctx.period_title());
        return;
    }
    if ctx.cli.json {
        println!("{}", output_usage_json(&agg, &ctx.period_label(), ctx.sort_order()));
    } else if ctx.cli.csv {
        print!("{}", output_usage_csv(&agg, ctx.sort_order()));
    } else if ctx.cli.chart {
        print_chart(charts, usage_chart(&agg));
    } else {
        let title = format!("Table usage for {} ({})", ctx.period_title(), ctx.studio);
        print_usage_table(&title, &agg, &ctx.table_options());
    }
}

fn handle_topups(ctx: &CommandContext<'_>, scope: PaymentScope) {
    if ctx.cli.chart {
        return unsupported("Chart", "top-ups");
    }
    let topups = fetch_payments(ctx.source, ctx.studio);
    let agg = aggregate_payments(&topups, scope.filter(ctx.month0, ctx.year), ctx.timezone);
    if agg.buckets.is_empty() {
        println!("No top-up data found.");
        return;
    }
    if ctx.cli.json {
        println!("{}", output_payment_json(&agg, scope.label(), ctx.sort_order()));
    } else if ctx.cli.csv {
        print!("{}", output_payment_csv(&agg, ctx.sort_order()));
    } else {
        let title = match scope {
            PaymentScope::MonthYear => format!("Top-ups for {}", ctx.period_title()),
            PaymentScope::Month => format!("Top-ups for month {} of every year", ctx.month0 + 1),
            PaymentScope::All => "All top-ups".to_string(),
        };
        print_payment_table(&format!("{title} ({})", ctx.studio), &agg, &ctx.table_options());
    }
}

fn handle_day(ctx: &CommandContext<'_>) {
    if ctx.cli.csv || ctx.cli.chart {
        return unsupported(if ctx.cli.csv { "CSV" } else { "Chart" }, "day");
    }
    let date = ctx.date.date();
    let frames = fetch_usage(ctx.source, ctx.studio);
    let topups = fetch_payments(ctx.source, ctx.studio);
    let usage = aggregate_usage(&frames, date.month0(), date.year(), ctx.timezone);
    let payments = aggregate_payments(
        &topups,
        PaymentFilter::MonthYear {
            month: date.month0(),
            year: date.year(),
        },
        ctx.timezone,
    );
    let detail = DayDetail::build(&usage, &payments, Target::Date(ctx.date), ctx.timezone);
    if ctx.cli.json {
        println!("{}", output_detail_json(&detail));
    } else {
        let opts = ctx.table_options();
        print!("{}", detail.render(opts.currency, ctx.number_format));
    }
}

fn handle_occupancy(ctx: &CommandContext<'_>, charts: &mut ChartSlot<ChartConfig>) {
    if ctx.cli.csv {
        return unsupported("CSV", "occupancy");
    }
    let frames = fetch_usage(ctx.source, ctx.studio);
    let tables = table_occupancy(&frames, ctx.date, Utc::now(), ctx.timezone);
    if tables.is_empty() {
        println!("No occupancy data found for {}.", ctx.date);
        return;
    }
    if ctx.cli.json {
        println!("{}", output_occupancy_json(ctx.date, &tables));
    } else if ctx.cli.chart {
        print_chart(charts, occupancy_chart(ctx.date, &tables));
    } else {
        let title = format!("Table occupancy on {} ({})", ctx.date, ctx.studio);
        print_occupancy_table(&title, &tables, &ctx.table_options());
    }
}

fn handle_tables(ctx: &CommandContext<'_>, charts: &mut ChartSlot<ChartConfig>) {
    let records = fetch_table_status(ctx.source, ctx.studio);
    let perf = table_performance(&records);
    if perf.is_empty() {
        println!("No table data found.");
        return;
    }
    if ctx.cli.json {
        println!("{}", output_status_json(&perf));
    } else if ctx.cli.csv {
        print!("{}", output_status_csv(&perf));
    } else if ctx.cli.chart {
        print_chart(charts, tables_chart(&perf));
    } else {
        let title = format!("Table performance ({})", ctx.studio);
        print_status_table(&title, &perf, &ctx.table_options());
    }
}

pub(crate) fn handle_command(command: Commands, ctx: &CommandContext<'_>) {
    let mut charts = ChartSlot::default();
    match command {
        Commands::Frames => handle_frames(ctx, &mut charts),
        Commands::Topups { scope } => handle_topups(ctx, scope),
        Commands::Day => handle_day(ctx),
        Commands::Occupancy => handle_occupancy(ctx, &mut charts),
        Commands::Tables => handle_tables(ctx, &mut charts),
    }
}
