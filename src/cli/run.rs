//! Handler for the `run` command.

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::app::{App, RunOptions, RunReport};
use crate::cli::{output, RunArgs};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> anyhow::Result<()> {
    let mut settings = args.paths.load_settings().context("invalid settings")?;

    // Apply CLI overrides
    if let Some(ref level) = args.log_level {
        settings.logging.level = level.clone();
    }
    if args.json_logs {
        settings.logging.format = "json".to_string();
    }
    if let Some(ref log_file) = args.log_file {
        settings.output.log_file = log_file.clone();
    }

    settings.init_logging();
    info!(
        wallets = %args.paths.wallets.display(),
        log_file = %settings.output.log_file.display(),
        dry_run = args.dry_run,
        "batchswap starting"
    );

    let options = RunOptions {
        wallets: args.paths.wallets.clone(),
        dry_run: args.dry_run,
        seed: args.seed,
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut handle = tokio::spawn(App::run(settings, options, shutdown_rx));

    let joined = tokio::select! {
        joined = &mut handle => joined,
        _ = signal::ctrl_c() => {
            warn!("Shutdown requested; finishing the current wallet");
            let _ = shutdown_tx.send(true);
            handle.await
        }
    };
    let report = joined.context("batch task failed")??;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    output::section("Summary");
    output::key_value("Processed", format!("{}/{}", report.processed, report.total));
    output::key_value("Succeeded", report.succeeded);
    output::key_value("Failed", report.failed);
    println!();

    if report.cancelled {
        output::warn("Batch cancelled before all wallets were processed");
    } else {
        output::ok("All wallets processed");
    }
}
