//! Handlers for `/quests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/quests` | Latest 20 quests + the current one |
//! | `POST` | `/quests/generate` | Run the daily selector; 201 + quest |
//! | `POST` | `/quests/generate-weekly` | Weekly selector; 201 + quest |
//! | `POST` | `/quests/{id}/complete` | Body: [`CompleteBody`] |
//! | `GET`  | `/quests/points` | `{"points": <balance>}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{Duration, Utc};
use rand::{SeedableRng as _, rngs::StdRng};
use serde::Deserialize;
use sparks_core::{
  media::{MediaKind, MediaStore as _},
  progress,
  quest::Reflection,
  select,
  store::SparkStore,
};
use uuid::Uuid;

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// How many latest quests the listing returns.
const LIST_LIMIT: usize = 20;

/// Trailing window consulted for repetition filtering.
const RECENCY_WINDOW_DAYS: i64 = 7;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /quests`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = Utc::now();
  let quests = state
    .store
    .list_quests(user.user_id, LIST_LIMIT)
    .await
    .map_err(ApiError::store)?;
  let current_quest = state
    .store
    .current_quest(user.user_id, now)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(serde_json::json!({
    "quests": quests,
    "current_quest": current_quest,
  })))
}

// ─── Generate ─────────────────────────────────────────────────────────────────

/// `POST /quests/generate`
pub async fn generate<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = Utc::now();
  let since = now - Duration::days(RECENCY_WINDOW_DAYS);
  let recent = state
    .store
    .recent_summaries(user.user_id, since)
    .await
    .map_err(ApiError::store)?;

  let mut rng = StdRng::from_os_rng();
  let plan = select::select_daily_quest(&user, &recent, &mut rng, now);

  let quest = state
    .store
    .insert_quest(plan)
    .await
    .map_err(ApiError::store)?;

  tracing::debug!(user_id = %user.user_id, title = %quest.title, "generated daily quest");

  Ok((
    StatusCode::CREATED,
    Json(serde_json::json!({
      "message": "quest generated successfully",
      "quest": quest,
    })),
  ))
}

/// `POST /quests/generate-weekly`
pub async fn generate_weekly<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut rng = StdRng::from_os_rng();
  let plan = select::select_weekly_quest(&user, &mut rng, Utc::now());

  let quest = state
    .store
    .insert_quest(plan)
    .await
    .map_err(ApiError::store)?;

  Ok((
    StatusCode::CREATED,
    Json(serde_json::json!({
      "message": "quest generated successfully",
      "quest": quest,
    })),
  ))
}

// ─── Complete ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /quests/{id}/complete`.
/// Media is submitted as base64; the upload collaborator turns it into
/// stable URLs before any quest/user mutation happens.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompleteBody {
  pub text:         Option<String>,
  pub image_base64: Option<String>,
  pub audio_base64: Option<String>,
}

fn decode_media(
  field: &str,
  value: Option<&String>,
) -> Result<Option<Vec<u8>>, ApiError> {
  value
    .map(|b64| {
      B64
        .decode(b64)
        .map_err(|_| ApiError::Validation(format!("{field} is not valid base64")))
    })
    .transpose()
}

/// `POST /quests/{id}/complete`
///
/// Runs under the caller's serialisation lock: precondition checks, media
/// upload, the conditional quest claim, and the stats write cannot
/// interleave with another completion or redemption for the same user.
pub async fn complete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(quest_id): Path<Uuid>,
  Json(body): Json<CompleteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lock = state.locks.for_user(user.user_id);
  let _guard = lock.lock().await;

  let quest = state
    .store
    .get_quest(quest_id, user.user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("quest {quest_id} not found")))?;

  if quest.completed {
    return Err(ApiError::AlreadyCompleted(format!(
      "quest {quest_id} is already completed"
    )));
  }

  // Upload media first so a collaborator failure aborts the completion
  // with no partial effect.
  let image_bytes = decode_media("image_base64", body.image_base64.as_ref())?;
  let audio_bytes = decode_media("audio_base64", body.audio_base64.as_ref())?;

  let mut image_url = None;
  if let Some(bytes) = image_bytes {
    let url = state
      .media
      .put(MediaKind::Image, bytes)
      .await
      .map_err(|e| ApiError::Upload(e.to_string()))?;
    image_url = Some(url);
  }

  let mut audio_url = None;
  if let Some(bytes) = audio_bytes {
    let url = state
      .media
      .put(MediaKind::Audio, bytes)
      .await
      .map_err(|e| ApiError::Upload(e.to_string()))?;
    audio_url = Some(url);
  }

  let reflection = Reflection {
    text: Some(body.text.unwrap_or_default()),
    image_url,
    audio_url,
  };

  let now = Utc::now();
  let claimed = state
    .store
    .complete_quest(quest_id, user.user_id, now, reflection)
    .await
    .map_err(ApiError::store)?;
  if !claimed {
    return Err(ApiError::AlreadyCompleted(format!(
      "quest {quest_id} is already completed"
    )));
  }

  // Re-read the user under the lock; the extractor's copy may predate a
  // completion that finished while we waited.
  let fresh = state
    .store
    .get_user(user.user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", user.user_id)))?;

  let update = progress::apply_completion(&fresh, quest.points, now);
  state
    .store
    .update_stats(user.user_id, update)
    .await
    .map_err(ApiError::store)?;

  let completed = state
    .store
    .get_quest(quest_id, user.user_id)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    user_id = %user.user_id,
    quest_id = %quest_id,
    points = quest.points,
    "quest completed"
  );

  Ok(Json(serde_json::json!({
    "message": "quest completed successfully",
    "points_earned": quest.points,
    "quest": completed,
  })))
}

// ─── Points ───────────────────────────────────────────────────────────────────

/// `GET /quests/points`
pub async fn points<S>(
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(serde_json::json!({ "points": user.spark_points })))
}
