//! Native messaging host entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use txlinks::persistence::migrate_database;
use txlinks::telemetry::StderrJsonlTelemetrySink;
use txlinks::{HostConfig, HostError, OctocrabGateway, build_router, serve};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), HostError> {
    let config = load_config()?;
    setup_logging(&config)?;

    if config.migrate_db {
        return run_migrations(&config);
    }

    let router = build_router(
        &config,
        Arc::new(OctocrabGateway::new()),
        Arc::new(StderrJsonlTelemetrySink),
    )?;
    tracing::info!("serving native messages on stdio");
    serve(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        Arc::new(router),
    )
    .await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`HostError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<HostConfig, HostError> {
    HostConfig::load().map_err(|error| HostError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr subscriber; stdout carries reply frames.
fn setup_logging(config: &HostConfig) -> Result<(), HostError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(txlinks::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|error| HostError::Logging {
            message: error.to_string(),
        })
}

fn run_migrations(config: &HostConfig) -> Result<(), HostError> {
    let database_url = config.require_database_url()?;
    let version = migrate_database(database_url, &StderrJsonlTelemetrySink)?;
    tracing::info!(schema_version = version.as_str(), "database migrated");
    Ok(())
}
