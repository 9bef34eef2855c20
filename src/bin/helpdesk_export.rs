use helpdesk_ticket_export::config::{Config, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_FILE};
use helpdesk_ticket_export::models::ticket::DayStatus;
use helpdesk_ticket_export::services::export_service::ExportService;
use helpdesk_ticket_export::sources::helpdesk::HelpdeskClient;
use helpdesk_ticket_export::{logging, util};

use anyhow::Context;
use clap::{App, Arg};
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = App::new("helpdesk_export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export helpdesk tickets one day at a time into a JSON file")
        .arg(
            Arg::with_name("start")
                .long("start")
                .value_name("DATE")
                .help("First day to export (YYYY-MM-DD), defaults to 2025-10-06")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("end")
                .long("end")
                .value_name("DATE")
                .help("Last day to export, inclusive (YYYY-MM-DD), defaults to 2025-10-27")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("endpoint")
                .long("endpoint")
                .value_name("URL")
                .help("Ticketing API endpoint")
                .env("HELPDESK_ENDPOINT")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Ticketing API key")
                .env("HELPDESK_API_KEY")
                .hide_env_values(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output JSON file")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT_FILE),
        )
        .arg(
            Arg::with_name("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Log file, appended to on every run")
                .takes_value(true)
                .default_value(DEFAULT_LOG_FILE),
        )
        .arg(
            Arg::with_name("timezone")
                .long("timezone")
                .value_name("TZ")
                .help("IANA time zone for day boundaries, defaults to local time")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();

    let start = match matches.value_of("start") {
        Some(s) => util::parse_date(s).with_context(|| format!("invalid --start '{}'", s))?,
        None => config.start_date,
    };
    let end = match matches.value_of("end") {
        Some(s) => util::parse_date(s).with_context(|| format!("invalid --end '{}'", s))?,
        None => config.end_date,
    };
    let timezone = matches.value_of("timezone").map(Config::parse_timezone).transpose()?;

    config = config
        .with_date_range(start, end)
        .with_endpoint(matches.value_of("endpoint").unwrap_or_default())
        .with_api_key(matches.value_of("api-key").unwrap_or_default())
        .with_output_path(matches.value_of("output").unwrap_or(DEFAULT_OUTPUT_FILE))
        .with_log_path(matches.value_of("log-file").unwrap_or(DEFAULT_LOG_FILE))
        .with_timezone(timezone);

    logging::init(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    config.validate()?;

    let client = HelpdeskClient::new(&config)?;
    info!("Using endpoint {}", client.endpoint());

    let service = ExportService::new(config, Arc::new(client));
    let report = service.run().await.context("failed to write export output")?;

    let no_data = report.count(DayStatus::NoData);
    let unexpected = report.count(DayStatus::UnexpectedFormat);
    if no_data + unexpected > 0 {
        warn!("{} day(s) without data, {} day(s) with unexpected format", no_data, unexpected);
    }

    Ok(())
}
