//! Solo Sparks server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, seeds the reward catalog on first boot, and
//! serves the JSON API plus uploaded reflection media over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use sparks_api::{AppState, DiskMediaStore, ServerConfig, UserLocks};
use sparks_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Solo Sparks API server")]
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SPARKS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in filesystem paths.
  let store_path = expand_tilde(&server_cfg.store_path);
  let media_dir = expand_tilde(&server_cfg.media_dir);

  // Open SQLite store and seed the reward catalog if it is empty.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let seeded = sparks_api::seed_rewards(&store)
    .await
    .context("failed to seed rewards")?;
  if seeded > 0 {
    tracing::info!("seeded {seeded} default rewards");
  }

  // Media directory for reflection uploads.
  let media = DiskMediaStore::new(&media_dir, server_cfg.media_base_url.clone());
  media
    .ensure_dir()
    .await
    .with_context(|| format!("failed to create media dir {media_dir:?}"))?;

  // Build application state and the router.
  let state = AppState {
    store: Arc::new(store),
    media: Arc::new(media),
    locks: UserLocks::default(),
  };

  let app = axum::Router::new()
    .nest("/api", sparks_api::api_router(state))
    .nest_service("/media", ServeDir::new(&media_dir))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
