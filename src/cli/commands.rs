//! CLI subcommand definitions

use clap::{Subcommand, ValueEnum};

use crate::core::PaymentFilter;

/// Main CLI commands
#[derive(Debug, Clone, Copy, Subcommand)]
pub(crate) enum Commands {
    /// Show table usage by calendar date (default)
    Frames,
    /// Show cash/online top-ups by business day
    Topups {
        /// Which business days to keep
        #[arg(long, value_enum, default_value = "month-year")]
        scope: PaymentScope,
    },
    /// Show usage and payments for a single day
    Day,
    /// Show per-table occupancy for a single day
    Occupancy,
    /// Show per-table totals and live status
    Tables,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum PaymentScope {
    /// Selected month of the selected year (default)
    #[default]
    MonthYear,
    /// Selected month of any year
    Month,
    /// Every business day
    All,
}

impl PaymentScope {
    /// Build the filter for a zero-based month and a year
    pub(crate) fn filter(self, month0: u32, year: i32) -> PaymentFilter {
        match self {
            PaymentScope::MonthYear => PaymentFilter::MonthYear {
                month: month0,
                year,
            },
            PaymentScope::Month => PaymentFilter::Month { month: month0 },
            PaymentScope::All => PaymentFilter::All,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            PaymentScope::MonthYear => "month-year",
            PaymentScope::Month => "month",
            PaymentScope::All => "all",
        }
    }
}

/// The command to run, `frames` when none was given
pub(crate) fn resolve_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Frames)
}
