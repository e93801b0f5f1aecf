//! Error types for `sparks-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("quest not found: {0}")]
  QuestNotFound(Uuid),

  #[error("quest {0} is already completed")]
  AlreadyCompleted(Uuid),

  #[error("reward not found: {0}")]
  RewardNotFound(Uuid),

  #[error("reward {reward_id} already redeemed by user {user_id}")]
  AlreadyRedeemed { user_id: Uuid, reward_id: Uuid },

  #[error("insufficient spark points: have {have}, need {need}")]
  InsufficientPoints { have: u32, need: u32 },

  #[error("validation error: {0}")]
  Validation(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
