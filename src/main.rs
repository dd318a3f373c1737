//! Main entry point for nsig-probe CLI

use clap::Parser;
use nsig_probe::cli::output::print_usage_error;
use nsig_probe::cli::{Args, OutputFormatter};
use nsig_probe::core::execute;
use nsig_probe::platform::YtDlpBackend;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for a rejected `--player` value
const USAGE_EXIT_CODE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args)?;

    debug!("Starting nsig-probe with args: {:?}", args);

    let mut formatter = OutputFormatter::new(std::io::stdout());

    match execute(&args, YtDlpBackend::new, &mut formatter).await {
        Ok(outcome) => {
            info!("Probe finished: {:?}", outcome);
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Err(e) if e.is_usage_error() => {
            print_usage_error(&e.to_string());
            Ok(ExitCode::from(USAGE_EXIT_CODE))
        }
        Err(e) => {
            // --verbose, or the report could not be written
            if let Some(traceback) = e.traceback() {
                eprintln!("{}", traceback.trim_end());
            }
            Err(anyhow::Error::new(e).context("nsig decoding failed"))
        }
    }
}

/// Initialize logging system
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));

    // stdout carries the report, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
