//! Redmine Indexer Main Entry Point
//!
//! Runs one indexing pass and reports the result through the exit code, so a
//! scheduler (cron, systemd timer, Kubernetes CronJob) can retry on its next tick.
//!
//! Exit codes: 0 when the run succeeded, 1 when it completed unsuccessfully, 2 when it
//! could not run at all.

use std::env;
use std::process::ExitCode;

use dotenv::dotenv;
use redmine_indexer::{Dependencies, ScheduledTask};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("redmine_indexer=info,redmine_indexer_repository=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "redmine-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "redmine-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    init_tracing();

    info!("Starting Redmine indexer");

    let deps = match Dependencies::new() {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return ExitCode::from(2);
        }
    };

    match deps.pipeline.execute().await {
        Ok(true) => {
            info!("Redmine indexer completed successfully");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            warn!("Redmine indexer run failed");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "Redmine indexer could not run");
            ExitCode::from(2)
        }
    }
}
