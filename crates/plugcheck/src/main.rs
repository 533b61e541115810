mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use tracing_subscriber::EnvFilter;

use plugcheck_core::kernel::constants::LOG_ENV_VAR;
use plugcheck_core::{check, CheckReport, Result};

use crate::cli::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(report) => {
            debug!("Check passed for {}", report.identity);
            ExitCode::SUCCESS
        }
        Err(e) => {
            for line in e.diagnostics() {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<CheckReport> {
    let report = check(args.request()?)?;
    let json = if args.json { Some(report.to_json()?) } else { None };
    if let Some(out) = &args.out {
        report.write_identity_record(out)?;
    }
    if let Some(json) = json {
        println!("{}", json);
    }
    Ok(report)
}

/// Route `log` records from the core into a stderr `tracing` subscriber
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to bridge log records: {}", e);
    }
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}
