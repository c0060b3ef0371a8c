use clap::Parser;
use clap::error::ErrorKind;
use std::process;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod models;
mod services;
mod store;

use config::{Args, Config};
use errors::BackupResult;
use services::backup_service::{self, BackupOutcome};
use store::swift::SwiftClient;

fn main() {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // --- Parse arguments ---
    // Usage problems exit with status 1 like every other failure of this
    // tool; help and version keep the conventional clean exit.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    let config = match Config::from_env_and_args(args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{:#}", err);
            process::exit(1);
        }
    };

    tracing::debug!("Container: {}", config.container);
    tracing::debug!("Keystone endpoint: {}", config.credentials.auth_url);
    tracing::debug!("Username: {}", config.credentials.username);
    tracing::debug!("Password: {}", config.credentials.masked_password());
    tracing::debug!("Project: {}", config.credentials.project);
    tracing::debug!("Source file: {}", config.source.display());

    match run(&config) {
        Ok(outcome) => {
            if outcome.source_removed {
                tracing::info!(
                    "Uploaded {} ({} bytes, md5 {}) and removed the source file",
                    outcome.object,
                    outcome.bytes,
                    outcome.content_hash
                );
            } else {
                tracing::info!(
                    "Uploaded {} ({} bytes, md5 {})",
                    outcome.object,
                    outcome.bytes,
                    outcome.content_hash
                );
            }
            process::exit(0);
        }
        Err(err) => {
            tracing::error!("{}", err);
            process::exit(1);
        }
    }
}

/// Authenticate, then hand the session to the pipeline.
fn run(config: &Config) -> BackupResult<BackupOutcome> {
    let client = SwiftClient::new(config.credentials.clone())?;
    let session = client.authenticate()?;
    backup_service::run_backup(&session, config)
}
