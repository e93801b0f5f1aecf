//! Handlers for `/analytics` endpoints. Read-only derived views; nothing
//! here mutates state.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/analytics/progress` | Weekly/monthly aggregates + achievements |
//! | `GET` | `/analytics/stats` | Counters and the growth score |

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Datelike as _, Months, NaiveTime, TimeZone as _, Utc};
use sparks_core::{analytics, store::SparkStore};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// Midnight on the first day of the month five months before `now`, the
/// start of the six-month aggregation window.
fn aggregation_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
  let anchor = now.checked_sub_months(Months::new(5)).unwrap_or(now);
  anchor
    .date_naive()
    .with_day(1)
    .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
    .unwrap_or(anchor)
}

/// `GET /analytics/progress`
pub async fn progress<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = Utc::now();
  let completed = state
    .store
    .completed_since(user.user_id, aggregation_window_start(now))
    .await
    .map_err(ApiError::store)?;

  let weekly_progress = analytics::weekly_progress(&completed, now);
  let monthly_stats = analytics::monthly_stats(&completed, now);

  let total_quests = state
    .store
    .count_completed(user.user_id)
    .await
    .map_err(ApiError::store)?;
  let total_points = state
    .store
    .total_points_earned(user.user_id)
    .await
    .map_err(ApiError::store)?;
  let total_reflections = state
    .store
    .count_reflections(user.user_id)
    .await
    .map_err(ApiError::store)?;

  let growth_score = analytics::growth_score(
    total_quests,
    user.current_streak,
    total_reflections,
  );

  Ok(Json(serde_json::json!({
    "weekly_progress": weekly_progress,
    "monthly_stats": monthly_stats,
    "achievements": user.achievements,
    "growth_metrics": {
      "total_quests": total_quests,
      "current_streak": user.current_streak,
      "total_points": total_points,
      "growth_score": growth_score,
    },
  })))
}

/// `GET /analytics/stats`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let completed_quests = state
    .store
    .count_completed(user.user_id)
    .await
    .map_err(ApiError::store)?;
  let total_reflections = state
    .store
    .count_reflections(user.user_id)
    .await
    .map_err(ApiError::store)?;

  let growth_score = analytics::growth_score(
    completed_quests,
    user.current_streak,
    total_reflections,
  );

  Ok(Json(serde_json::json!({
    "completed_quests": completed_quests,
    "current_streak": user.current_streak,
    "total_reflections": total_reflections,
    "growth_score": growth_score,
  })))
}
