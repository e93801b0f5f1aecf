//! Handlers for `/profile` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/profile/psychology` | Partial tag/mood update, sets onboarding |
//! | `POST` | `/profile/mood` | Adds a journal entry and the current mood |
//! | `GET`  | `/profile/mood-history` | Optional `?days=N`, default 30 |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use sparks_core::{
  mood::{Mood, NewMoodEntry},
  store::SparkStore,
  user::ProfileUpdate,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

const MAX_NOTE_LENGTH: usize = 500;

// ─── Psychology profile ───────────────────────────────────────────────────────

/// `PUT /profile/psychology`
pub async fn update_psychology<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(update): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(bio) = &update.bio
    && bio.len() > MAX_NOTE_LENGTH
  {
    return Err(ApiError::Validation(format!(
      "bio must be at most {MAX_NOTE_LENGTH} characters"
    )));
  }

  let updated = state
    .store
    .update_profile(user.user_id, update)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", user.user_id)))?;

  Ok(Json(serde_json::json!({
    "message": "psychology profile updated successfully",
    "user": updated,
  })))
}

// ─── Mood entries ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MoodBody {
  pub mood:       Mood,
  pub intensity:  u8,
  pub notes:      Option<String>,
  #[serde(default)]
  pub triggers:   Vec<String>,
  #[serde(default)]
  pub activities: Vec<String>,
}

/// `POST /profile/mood`
///
/// Recording an entry also updates the user's current mood, which feeds
/// the quest selector's point bonus.
pub async fn add_mood<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<MoodBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !(1..=10).contains(&body.intensity) {
    return Err(ApiError::Validation(
      "intensity must be between 1 and 10".into(),
    ));
  }
  if let Some(notes) = &body.notes
    && notes.len() > MAX_NOTE_LENGTH
  {
    return Err(ApiError::Validation(format!(
      "notes must be at most {MAX_NOTE_LENGTH} characters"
    )));
  }

  let entry = state
    .store
    .insert_mood_entry(NewMoodEntry {
      user_id:    user.user_id,
      mood:       body.mood,
      intensity:  body.intensity,
      notes:      body.notes,
      triggers:   body.triggers,
      activities: body.activities,
    })
    .await
    .map_err(ApiError::store)?;

  state
    .store
    .set_current_mood(user.user_id, body.mood)
    .await
    .map_err(ApiError::store)?;

  Ok((
    StatusCode::CREATED,
    Json(serde_json::json!({
      "message": "mood entry added successfully",
      "mood_entry": entry,
    })),
  ))
}

#[derive(Debug, Deserialize)]
pub struct MoodHistoryParams {
  pub days: Option<i64>,
}

/// `GET /profile/mood-history[?days=N]`
pub async fn mood_history<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<MoodHistoryParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let days = params.days.unwrap_or(30).clamp(1, 365);
  let since = Utc::now() - Duration::days(days);

  let history = state
    .store
    .mood_entries_since(user.user_id, since)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(serde_json::json!({ "mood_history": history })))
}
