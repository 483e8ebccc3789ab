//! Multi-table card room server.
//!
//! Spawns one table actor per configured table and serves them over
//! HTTP and WebSockets until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Error};
use card_room::{
    auth::TokenVerifier,
    table::{TableConfig, TableManager},
};
use cr_server::{
    api,
    config::{CliOverrides, ServerConfig},
    logging,
};
use pico_args::Arguments;
use tracing::{error, info};

const HELP: &str = "\
Run a multi-table card room server

USAGE:
  cr_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]
  --tables     N           Number of tables to create  [default: env INITIAL_TABLES or 1]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  JWT_SECRET               Token signing secret (required, at least 32 characters)
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  CORS_ORIGIN              Allowed browser origin [default: any]
  MAX_TABLES               Maximum number of open tables [default: 16]
  TABLE_SMALL_BLIND        Small blind [default: 50]
  TABLE_BIG_BLIND          Big blind [default: 100]
  TABLE_STARTING_STACK     Chips each seat starts with [default: 100000]
  TABLE_MAX_SEATS          Seats per table, 2 to 10 [default: 10]
  START_COUNTDOWN_SECS     Countdown before a hand deals [default: 5]
  RUST_LOG                 Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let overrides = CliOverrides {
        bind: pargs.opt_value_from_str("--bind")?,
        tables: pargs.opt_value_from_str("--tables")?,
    };

    logging::init();

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    let table_manager = Arc::new(TableManager::new(config.max_tables));
    for i in 0..config.initial_tables {
        let table = TableConfig {
            name: format!("Table {}", i + 1),
            ..config.table_defaults.clone()
        };
        match table_manager.create_table(table).await {
            Ok(table_id) => info!("Created table {} with ID {}", i + 1, table_id),
            Err(e) => error!("Failed to create table {}: {}", i + 1, e),
        }
    }

    for table in table_manager.list_tables().await {
        info!(
            "  - {} (ID: {}) - {}/{} seats, blinds: {}/{}",
            table.name,
            table.id,
            table.seat_count,
            table.max_seats,
            table.small_blind,
            table.big_blind
        );
    }

    let state = api::AppState {
        table_manager: table_manager.clone(),
        verifier: Arc::new(TokenVerifier::new(&config.jwt_secret)),
    };
    let app = api::create_router(state, api::cors_layer(config.cors_origin.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    table_manager.close_all().await;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler can't be installed the server runs
/// until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
