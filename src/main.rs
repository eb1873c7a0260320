mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{CommandContext, handle_command, resolve_period};
use crate::cli::{Cli, resolve_command};
use crate::config::Config;
use crate::consts::{DEFAULT_API_URL, DEFAULT_STUDIO};
use crate::core::DateKey;
use crate::error::AppError;
use crate::output::NumberFormat;
use crate::source::{FileSource, HttpSource, Source};
use crate::utils::Timezone;

fn init_tracing(debug: bool) {
    // --debug overrides RUST_LOG
    let filter = if debug {
        EnvFilter::new("snookerstats=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let date = match cli.date.as_deref() {
        Some(raw) => DateKey::parse(raw)?,
        None => DateKey::from(timezone.today()),
    };
    let (month0, year) = resolve_period(cli.month, cli.year, date.date())?;

    let source: Box<dyn Source> = match &cli.data_dir {
        Some(dir) => Box::new(FileSource::new(dir.clone())),
        None => Box::new(HttpSource::new(
            cli.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
        )),
    };
    let studio = cli.studio.as_deref().unwrap_or(DEFAULT_STUDIO);
    debug!(source = %source.describe(), studio, %date, month0, year, "resolved options");

    let ctx = CommandContext {
        cli: &cli,
        source: source.as_ref(),
        studio,
        timezone,
        number_format,
        month0,
        year,
        date,
    };
    handle_command(resolve_command(cli.command), &ctx);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let (config, config_path) = Config::load();
    let cli = cli.with_config(&config);

    init_tracing(cli.debug);
    if let Some(path) = config_path {
        debug!(path = %path.display(), "loaded config");
    }

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
