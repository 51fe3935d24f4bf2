//! `fundly` — terminal client for a self-hosted personal-finance server.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive state from
//! `fundly-core`'s stores. The server authenticates with a session
//! cookie; a small marker file remembers between runs whether a session
//! was established, so the client can start on the budget listing
//! instead of the landing screen.
//!
//! Logs go to a file — never stdout/stderr, which the TUI owns.
//!
//! Entry point: CLI parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fundly_api::{ApiClient, TlsMode, TransportConfig};
use fundly_config::{Config, FileSession};
use fundly_core::Stores;

use crate::app::App;

/// Terminal client for budgets, expenses and categories.
#[derive(Parser, Debug)]
#[command(name = "fundly", version, about)]
struct Cli {
    /// Server URL (e.g., https://fundly.example.org)
    #[arg(short = 's', long, env = "FUNDLY_SERVER_URL")]
    server: Option<String>,

    /// Log file path (defaults to <data dir>/fundly.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Skip TLS certificate verification (self-signed servers)
    #[arg(long)]
    insecure: bool,
}

/// Set up file-based tracing. Returns a guard that must be held for the
/// lifetime of the application so logs flush on exit.
fn setup_tracing(cli: &Cli, config: &Config) -> WorkerGuard {
    let filter = if cli.verbose == 0 {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log.filter.clone()))
    } else {
        let level = match cli.verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("fundly={level},fundly_core={level},fundly_api={level}"))
    };

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.log.file.clone())
        .unwrap_or_else(|| fundly_config::data_dir().join("fundly.log"));
    let log_dir = log_path
        .parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let log_filename = log_path
        .file_name()
        .map_or_else(|| std::ffi::OsString::from("fundly.log"), ToOwned::to_owned);
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build the API client from config plus CLI overrides.
fn build_api(cli: &Cli, config: &Config) -> Result<ApiClient> {
    let base_url = cli.server.as_deref().unwrap_or(&config.server.url);

    let tls = if cli.insecure || config.server.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(path) = &config.server.ca_cert {
        TlsMode::CustomCa(path.clone())
    } else {
        TlsMode::System
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(config.server.timeout),
        cookie_jar: None,
    }
    .with_cookie_jar();

    ApiClient::new(base_url, transport)
        .wrap_err_with(|| format!("cannot reach server at {base_url}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = fundly_config::load_config_or_default();

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli, &config);

    info!(
        server = cli.server.as_deref().unwrap_or(&config.server.url),
        "starting fundly"
    );

    let api = build_api(&cli, &config)?;
    let session = Arc::new(FileSession::new());
    let stores = Stores::new(api, session);

    let mut app = App::new(stores);
    app.run().await?;

    Ok(())
}
