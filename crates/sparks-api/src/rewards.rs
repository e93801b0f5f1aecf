//! Handlers for `/rewards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/rewards` | Active rewards with per-user `redeemed` flags |
//! | `POST` | `/rewards/{id}/redeem` | Returns `{"remaining_points": ...}` |

use std::collections::HashSet;

use axum::{
  Json,
  extract::{Path, State},
  response::IntoResponse,
};
use serde::Serialize;
use sparks_core::{reward::Reward, store::SparkStore};
use uuid::Uuid;

use crate::{AppState, auth::CurrentUser, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// A catalog entry annotated with the caller's redemption status.
#[derive(Debug, Serialize)]
pub struct RewardWithStatus {
  #[serde(flatten)]
  pub reward:   Reward,
  pub redeemed: bool,
}

/// `GET /rewards`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let rewards = state
    .store
    .list_rewards(true)
    .await
    .map_err(ApiError::store)?;
  let redeemed: HashSet<Uuid> = state
    .store
    .redemptions_for_user(user.user_id)
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .map(|r| r.reward_id)
    .collect();

  let annotated: Vec<RewardWithStatus> = rewards
    .into_iter()
    .map(|reward| RewardWithStatus {
      redeemed: redeemed.contains(&reward.reward_id),
      reward,
    })
    .collect();

  Ok(Json(serde_json::json!({ "rewards": annotated })))
}

// ─── Redeem ───────────────────────────────────────────────────────────────────

/// `POST /rewards/{id}/redeem`
///
/// Preconditions are checked in order under the caller's serialisation
/// lock; the first failure wins and nothing is mutated. The conditional
/// debit and the UNIQUE ledger constraint back the checks up against
/// callers that bypass the lock.
pub async fn redeem<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(reward_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lock = state.locks.for_user(user.user_id);
  let _guard = lock.lock().await;

  let reward = state
    .store
    .get_reward(reward_id)
    .await
    .map_err(ApiError::store)?
    .filter(|r| r.is_active)
    .ok_or_else(|| ApiError::NotFound(format!("reward {reward_id} not found")))?;

  let existing = state
    .store
    .find_redemption(user.user_id, reward_id)
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::AlreadyRedeemed(format!(
      "reward {reward_id} was already redeemed"
    )));
  }

  // Balance read under the lock; the extractor's copy may be stale.
  let fresh = state
    .store
    .get_user(user.user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", user.user_id)))?;
  if fresh.spark_points < reward.cost {
    return Err(ApiError::InsufficientPoints(format!(
      "need {} spark points, have {}",
      reward.cost, fresh.spark_points
    )));
  }

  let debited = state
    .store
    .try_debit_points(user.user_id, reward.cost)
    .await
    .map_err(ApiError::store)?;
  if !debited {
    return Err(ApiError::InsufficientPoints(format!(
      "need {} spark points",
      reward.cost
    )));
  }

  state
    .store
    .insert_redemption(user.user_id, reward_id)
    .await
    .map_err(ApiError::store)?;

  let remaining = fresh.spark_points - reward.cost;

  tracing::info!(
    user_id = %user.user_id,
    reward_id = %reward_id,
    cost = reward.cost,
    "reward redeemed"
  );

  Ok(Json(serde_json::json!({
    "message": "reward redeemed successfully",
    "remaining_points": remaining,
  })))
}
