mod chart;
mod csv;
mod detail;
mod format;
mod json;
mod table;

pub(crate) use chart::{ChartConfig, ChartSlot, occupancy_chart, tables_chart, usage_chart};
pub(crate) use csv::{output_payment_csv, output_status_csv, output_usage_csv};
pub(crate) use detail::DayDetail;
pub(crate) use format::NumberFormat;
pub(crate) use json::{
    output_detail_json, output_occupancy_json, output_payment_json, output_status_json,
    output_usage_json,
};
pub(crate) use table::{
    TableOptions, print_occupancy_table, print_payment_table, print_status_table,
    print_usage_table,
};
