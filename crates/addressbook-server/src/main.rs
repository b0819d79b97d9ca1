//! addressbook-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured contact store, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use addressbook_core::memory::MemoryDao;
use addressbook_server::{ServerConfig, app, build_store, expand_tilde};
use addressbook_store_sqlite::SqliteDao;
use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Address book HTTP server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let router = match &server_cfg.store_path {
    Some(path) => {
      let store_path = expand_tilde(path);
      let dao = SqliteDao::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!(?store_path, "using sqlite contact store");
      let store = build_store(dao, server_cfg.id_strategy)
        .await
        .context("failed to read stored contacts")?;
      app(Arc::new(store))
    }
    None => {
      tracing::warn!("no store_path configured; contacts are kept in memory");
      let store = build_store(MemoryDao::new(), server_cfg.id_strategy).await?;
      app(Arc::new(store))
    }
  };

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router).await.context("server error")?;

  Ok(())
}
