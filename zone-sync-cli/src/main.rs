//! `check_zone_sync` monitoring plugin entry point
//!
//! Prints exactly one `STATUS: message` line on stdout and exits with the
//! plugin code. Logs go to stderr so they never mix with the plugin output.

mod args;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zone_sync_probe::{CheckOutcome, HickoryZoneResolver, Status, ZoneSyncCheck};

use args::Cli;
use config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        // Usage errors must not look like a CRITICAL zone.
        Err(e) => return report(&CheckOutcome::new(Status::Unknown, usage_error(&e))),
    };

    init_tracing(cli.verbose);

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {e:#}");
            let message = format!("{e:#}");
            return report(&CheckOutcome::new(Status::Unknown, single_line(&message)));
        }
    };
    tracing::debug!(
        "Checking {} (hidden primaries: {:?}, thresholds: {:?}, timeout: {:?})",
        settings.request.domain,
        settings.request.hidden_primaries,
        settings.request.thresholds,
        settings.query_timeout
    );

    let resolver = Arc::new(HickoryZoneResolver::with_timeout(settings.query_timeout));
    let check = ZoneSyncCheck::new(resolver);
    let outcome = check.run(&settings.request).await;

    report(&outcome)
}

/// Print the plugin line and turn the status into the exit code.
fn report(outcome: &CheckOutcome) -> ExitCode {
    println!("{outcome}");
    ExitCode::from(outcome.exit_code())
}

/// First line of a clap error, without the `error: ` prefix.
fn usage_error(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Collapse multi-line error text (e.g. TOML parse errors) onto one line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Initialize tracing to stderr (stdout carries the plugin output).
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
