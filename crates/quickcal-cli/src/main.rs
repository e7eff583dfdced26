//! `quickcal` CLI — find the time that is free on all of your calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Google Calendar, next 5 days, times shown in America/Chicago
//! QUICKCAL_SOURCE__ACCESS_TOKEN=ya29... quickcal
//!
//! # Next 2 days, only slots of at least 30 minutes, as JSON
//! quickcal --days 2 --min-minutes 30 --format json
//!
//! # Offline, from a snapshot file, pinned to a start time
//! quickcal --source file --events-file calendars.json --now 2026-03-16T14:00:00Z
//!
//! # Keep going when one calendar cannot be fetched
//! quickcal --on-fetch-error skip
//! ```

mod config;
mod fetch;
mod logging;
mod render;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use clap::Parser;
use quickcal_engine::freebusy::at_least;
use quickcal_engine::{build_report, parse_instant, QueryWindow};
use tracing::info;

use config::{Config, FetchPolicy, OutputFormat, Overrides, SourceKind, SourceOverrides};

#[derive(Parser)]
#[command(
    name = "quickcal",
    version,
    about = "Find the time that is free on all of your calendars"
)]
struct Cli {
    /// TOML config file (defaults to $QUICKCAL_CONFIG when set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of days to look ahead
    #[arg(short, long)]
    days: Option<u32>,

    /// Start of the window as RFC 3339 (defaults to the current time)
    #[arg(long)]
    now: Option<String>,

    /// IANA timezone used to print times
    #[arg(long)]
    timezone: Option<String>,

    /// Where to read calendars from
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Snapshot file for `--source file`
    #[arg(long)]
    events_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Hide shared free slots shorter than this many minutes
    #[arg(long)]
    min_minutes: Option<u32>,

    /// What to do when one calendar cannot be fetched
    #[arg(long, value_enum)]
    on_fetch_error: Option<FetchPolicy>,

    /// Only include this calendar id (repeatable)
    #[arg(long = "calendar")]
    calendars: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            days: self.days,
            display_timezone: self.timezone.clone(),
            format: self.format,
            min_minutes: self.min_minutes,
            on_fetch_error: self.on_fetch_error,
            source: SourceOverrides {
                kind: self.source,
                events_file: self.events_file.clone(),
                calendars: self.calendars.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init(&config.logging).context("Failed to initialize logging")?;

    let now = match cli.now.as_deref() {
        Some(raw) => parse_instant(raw, Tz::UTC).context("Invalid --now value")?,
        None => Utc::now(),
    };
    let window = QueryWindow::new(now, config.days)?;
    let zone = config.display_zone()?;

    let source = source::create_source(&config.source)
        .context("Failed to set up calendar source")?;
    let fetched = fetch::fetch_all(
        source.as_ref(),
        &window,
        &config.source.calendars,
        config.on_fetch_error,
    )
    .await?;

    let mut report = build_report(window, &fetched.calendars).with_failures(fetched.failed);
    if config.min_minutes > 0 {
        report.combined = at_least(
            &report.combined,
            Duration::minutes(i64::from(config.min_minutes)),
        );
    }
    info!(
        calendars = report.calendars.len(),
        slots = report.combined.len(),
        "computed availability"
    );

    let output = match config.format {
        OutputFormat::Text => render::render_text(&report, zone),
        OutputFormat::Json => {
            let mut json = render::render_json(&report).context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };
    print!("{}", output);

    Ok(())
}
