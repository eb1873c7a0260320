//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortOrder {
    /// Oldest first (default)
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl From<ConfigSortOrder> for SortOrder {
    fn from(order: ConfigSortOrder) -> Self {
        match order {
            ConfigSortOrder::Asc => SortOrder::Asc,
            ConfigSortOrder::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ConfigColorMode> for ColorMode {
    fn from(mode: ConfigColorMode) -> Self {
        match mode {
            ConfigColorMode::Auto => ColorMode::Auto,
            ConfigColorMode::Always => ColorMode::Always,
            ConfigColorMode::Never => ColorMode::Never,
        }
    }
}

#[derive(Parser)]
#[command(name = "snookerstats")]
#[command(about = "Snooker studio usage and payment statistics", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Studio name as registered with the API
    #[arg(short, long, global = true)]
    pub(crate) studio: Option<String>,

    /// Month to report (1-12, defaults to the current month)
    #[arg(short, long, global = true)]
    pub(crate) month: Option<u32>,

    /// Year to report (defaults to the current year)
    #[arg(short, long, global = true)]
    pub(crate) year: Option<i32>,

    /// Day to inspect (YYYYMMDD or YYYY-MM-DD, defaults to today)
    #[arg(short, long, global = true)]
    pub(crate) date: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Output a Chart.js bar chart config
    #[arg(long, global = true, conflicts_with_all = ["json", "csv"])]
    pub(crate) chart: bool,

    /// Sort order for results
    #[arg(short, long, global = true, value_enum, default_value = "asc")]
    pub(crate) order: SortOrder,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Timezone for business days (e.g., "Asia/Kolkata", "UTC", "+05:30")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "en", "hi", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Currency symbol placed before money amounts
    #[arg(long, global = true, value_name = "SYMBOL")]
    pub(crate) currency: Option<String>,

    /// Base URL of the studio data API
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) api_url: Option<String>,

    /// Read frames.json, topup.json and tabledets.json from a directory
    /// instead of the API
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // Enums only take the config value while the CLI is at its default
        if let Some(order) = config.order
            && self.order == SortOrder::Asc
        {
            self.order = order.into();
        }
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = color.into();
        }

        if self.studio.is_none() {
            self.studio = config.studio.clone();
        }
        if self.api_url.is_none() {
            self.api_url = config.api_url.clone();
        }
        if self.data_dir.is_none() {
            self.data_dir = config.data_dir.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.currency.is_none() {
            self.currency = config.currency.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
