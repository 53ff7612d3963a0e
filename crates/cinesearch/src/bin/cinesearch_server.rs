//! Cinesearch REST Server
//!
//! Loads the configured catalog and embeddings into a search engine and
//! serves it over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use marquee::event_log::{EventLog, DEFAULT_CAPACITY};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cinesearch::config::{state_dir, EngineConfig};
use cinesearch::server::{startup::start_server, AppState};
use cinesearch::SearchEngine;

#[derive(Parser)]
#[command(name = "cinesearch_server")]
#[command(about = "Cinesearch REST API Server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:5002")]
  bind: SocketAddr,

  /// Configuration file (defaults to $CINESEARCH_CONFIG or ~/.cinesearch/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("info,tower_http=debug")
  } else {
    EnvFilter::new("cinesearch=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  if args.verbose {
    marquee::set_level(marquee::Level::Debug);
  }

  marquee::announce(&format!("Cinesearch REST Server v{}", env!("CARGO_PKG_VERSION")));

  let config = EngineConfig::load_with(args.config.as_deref())?;
  let engine = tokio::task::spawn_blocking(move || SearchEngine::from_config(&config))
    .await?
    .context("Failed to load the search index")?;

  let logs_dir = state_dir();
  std::fs::create_dir_all(&logs_dir)
    .with_context(|| format!("Failed to create {}", logs_dir.display()))?;
  let logs = EventLog::with_file(DEFAULT_CAPACITY, logs_dir.join("server.logs.jsonl"))?;

  marquee::info!("Binding to address: {}", args.bind);
  start_server(args.bind, AppState::new(Arc::new(engine), Arc::new(logs))).await
}
