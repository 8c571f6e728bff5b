// Calendar layout command-line entry point

mod cli;

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use calendar_layout::services::event::{
    EventStore, FetchRequest, FetchScheduler, StaticEventSource,
};
use calendar_layout::services::settings::SettingsService;
use calendar_layout::utils::date::parse_iso_date;
use calendar_layout::utils::logging::init_logging;
use calendar_layout::{EngineSettings, ViewComposer, ViewKind};

fn main() -> Result<()> {
    init_logging()?;
    let args = cli::Cli::parse();

    let view: ViewKind = args.view.into();
    let date = parse_date_arg("--date", &args.date)?;
    let today = match args.today.as_deref() {
        Some(raw) => parse_date_arg("--today", raw)?,
        None => Local::now().date_naive(),
    };
    let settings = load_settings(args.config.as_deref())?;

    let raw = fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read {}", args.events.display()))?;
    let source = StaticEventSource::from_json_str(&raw)?;
    log::info!("loaded {} event records from {}", source.len(), args.events.display());

    let mut scheduler = FetchScheduler::new(Duration::ZERO);
    let now = Instant::now();
    scheduler.request(FetchRequest::for_view(view, date, settings.first_day_of_week), now);
    let ticket = scheduler
        .poll(now)
        .ok_or_else(|| anyhow!("No fetch was scheduled"))?;

    let records = ticket.execute(&source)?;
    let mut store = EventStore::new();
    store.apply_response(&scheduler, &ticket, &records);

    let output = if args.normalized {
        serde_json::to_string_pretty(store.events())?
    } else {
        let composer = ViewComposer::new(settings);
        serde_json::to_string_pretty(&composer.compose(view, store.events(), date, today))?
    };
    println!("{}", output);
    Ok(())
}

fn parse_date_arg(flag: &str, raw: &str) -> Result<NaiveDate> {
    parse_iso_date(raw).ok_or_else(|| anyhow!("{} expects YYYY-MM-DD, got {:?}", flag, raw))
}

fn load_settings(path: Option<&std::path::Path>) -> Result<EngineSettings> {
    match path {
        Some(path) => SettingsService::new(path)
            .load()
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(SettingsService::from_default_location()
            .map(|service| service.load_or_default())
            .unwrap_or_default()),
    }
}
