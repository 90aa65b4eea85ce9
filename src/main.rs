//! Gridle - Unified CLI
//!
//! Daily driver-guessing game: HTTP server, terminal client and tools.

#![warn(missing_docs)]

mod cli;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use gridle::{
    GameClient, GameServer, GridleConfig, JsonFileRoster, PlayLoop, PlayerService, RosterProvider,
    SqliteStore, print_statistics, run_play, suggest,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GridleConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Serve {
            host,
            port,
            roster,
            hide_answer,
        } => {
            initialize_server_tracing();
            let mut config = config;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(roster) = roster {
                config = config.with_roster_path(roster);
            }
            if hide_answer {
                config = config.with_reveal_answer(false);
            }
            run_server(config).await
        }
        Command::Play { server_url, db_path } => {
            initialize_client_tracing();
            let mut config = config;
            if let Some(url) = server_url {
                config = config.with_server_url(url);
            }
            if let Some(path) = db_path {
                config = config.with_db_path(path);
            }
            run_client(config).await
        }
        Command::Stats { db_path } => {
            initialize_client_tracing();
            let path = db_path.unwrap_or_else(|| config.db_path().clone());
            show_statistics(path)
        }
        Command::Names { roster, query } => {
            initialize_client_tracing();
            let path = roster.unwrap_or_else(|| config.roster_path().clone());
            list_names(path, query).await
        }
    }
}

/// Run the HTTP game server
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
async fn run_server(config: GridleConfig) -> Result<()> {
    info!(roster = %config.roster_path(), "Starting gridle HTTP server");

    let roster = JsonFileRoster::new(config.roster_path());
    // Fail fast on a missing or malformed roster; requests re-read it later.
    let snapshot = roster.roster().await?;
    info!(drivers = snapshot.len(), "Roster validated");

    GameServer::new(roster)
        .with_reveal_answer(*config.reveal_answer())
        .serve(config.host(), *config.port())
        .await
}

/// Run the terminal client
#[instrument(skip_all, fields(server_url = %config.server_url(), db_path = %config.db_path()))]
async fn run_client(config: GridleConfig) -> Result<()> {
    let store = SqliteStore::open(config.db_path().clone())?;
    let service = PlayerService::new(store);
    let client = GameClient::new(config.server_url());

    let play = PlayLoop::start(client, service).await;
    run_play(play).await
}

/// Print lifetime statistics
#[instrument]
fn show_statistics(db_path: String) -> Result<()> {
    let store = SqliteStore::open(db_path)?;
    let stats = PlayerService::new(store).statistics()?;

    let mut out = std::io::stdout();
    print_statistics(&stats, &mut out)?;
    Ok(())
}

/// Print roster names, or those matching `query`
#[instrument]
async fn list_names(roster_path: String, query: Option<String>) -> Result<()> {
    let roster = JsonFileRoster::new(&roster_path).roster().await?;
    let names = roster.names();

    let mut out = std::io::stdout();
    match query {
        Some(query) => {
            for name in suggest(&names, &query) {
                writeln!(out, "{}", name)?;
            }
        }
        None => {
            for name in &names {
                writeln!(out, "{}", name)?;
            }
        }
    }
    Ok(())
}

fn initialize_server_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gridle=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Server tracing initialized");
}

/// Client output shares the terminal, so logs go to stderr at `warn`.
fn initialize_client_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
