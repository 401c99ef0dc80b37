//! mermelada-api server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, seeds the demo dataset on first run, spawns the
//! daily sweep task, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chrono::NaiveTime;
use clap::Parser;
use mermelada_api::{AppState, ServerConfig, api_router, trigger::spawn_daily_sweep};
use mermelada_core::sweep::CompletionPolicy;
use mermelada_mailer::SmtpMailer;
use mermelada_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mermelada CRM server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration; env vars override the file (MERMELADA_PORT,
  // MERMELADA_SMTP__PASSWORD, ...).
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MERMELADA").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let sweep_time = NaiveTime::from_hms_opt(server_cfg.sweep_hour, 0, 0)
    .context("sweep_hour must be between 0 and 23")?;

  // Open SQLite store and bootstrap the demo dataset if empty.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;
  store
    .seed_demo_data()
    .await
    .context("failed to seed demo data")?;

  // SMTP transport: configured once, shared by the resend handler and the
  // daily sweep.
  let mailer =
    SmtpMailer::new(&server_cfg.smtp).context("failed to build SMTP mailer")?;

  let state = AppState {
    store:  Arc::new(store),
    mailer: Arc::new(mailer),
  };

  spawn_daily_sweep(
    Arc::clone(&state.store),
    Arc::clone(&state.mailer),
    sweep_time,
    CompletionPolicy::AlwaysRemind,
  );

  let app = axum::Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
