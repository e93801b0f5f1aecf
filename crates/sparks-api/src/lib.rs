//! JSON REST API for Solo Sparks.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sparks_core::store::SparkStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sparks_api::api_router(state))
//! ```

pub mod analytics;
pub mod auth;
pub mod error;
pub mod media;
pub mod profile;
pub mod quests;
pub mod rewards;

use std::{
  collections::HashMap,
  path::PathBuf,
  sync::{Arc, Mutex as StdMutex},
};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use sparks_core::{catalog, store::SparkStore};
use uuid::Uuid;

pub use error::ApiError;
pub use media::DiskMediaStore;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_media_base_url() -> String { "/media".to_string() }

/// Runtime server configuration, deserialised from `config.toml` merged
/// with `SPARKS_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub media_dir:  PathBuf,
  #[serde(default = "default_media_base_url")]
  pub media_base_url: String,
}

// ─── Per-user serialisation ───────────────────────────────────────────────────

/// Registry of per-user mutexes.
///
/// Multi-step read-modify-write sequences (quest completion, reward
/// redemption) hold the user's mutex for their whole duration, so two
/// concurrent requests for the same user cannot interleave their reads
/// and writes.
#[derive(Clone, Default)]
pub struct UserLocks {
  inner: Arc<StdMutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl UserLocks {
  /// The serialisation mutex for one user's mutations.
  pub fn for_user(&self, id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
    let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
    map.entry(id).or_default().clone()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: SparkStore> {
  pub store: Arc<S>,
  pub media: Arc<DiskMediaStore>,
  pub locks: UserLocks,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Auth
    .route("/auth/register", post(auth::register::<S>))
    .route("/auth/me", get(auth::me::<S>))
    // Quests
    .route("/quests", get(quests::list::<S>))
    .route("/quests/generate", post(quests::generate::<S>))
    .route("/quests/generate-weekly", post(quests::generate_weekly::<S>))
    .route("/quests/points", get(quests::points::<S>))
    .route("/quests/{id}/complete", post(quests::complete::<S>))
    // Rewards
    .route("/rewards", get(rewards::list::<S>))
    .route("/rewards/{id}/redeem", post(rewards::redeem::<S>))
    // Profile
    .route("/profile/psychology", put(profile::update_psychology::<S>))
    .route("/profile/mood", post(profile::add_mood::<S>))
    .route("/profile/mood-history", get(profile::mood_history::<S>))
    // Analytics
    .route("/analytics/progress", get(analytics::progress::<S>))
    .route("/analytics/stats", get(analytics::stats::<S>))
    .with_state(state)
}

// ─── Reward seeding ───────────────────────────────────────────────────────────

/// Seed the default reward catalog if the store holds no rewards yet.
/// Returns how many rewards were inserted (zero when already seeded).
pub async fn seed_rewards<S>(store: &S) -> Result<usize, S::Error>
where
  S: SparkStore,
{
  if store.count_rewards().await? > 0 {
    return Ok(0);
  }

  let defaults = catalog::default_rewards();
  let count = defaults.len();
  for reward in defaults {
    store.insert_reward(reward).await?;
  }
  Ok(count)
}

// ─── Integration tests ────────────────────────────────────────────────────────
