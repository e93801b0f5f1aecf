//! Reward catalog entries and the per-user redemption ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
  ProfileBoost,
  ExclusiveContent,
  SpecialBadge,
  PremiumFeature,
}

/// A redeemable catalog entry. Inactive rewards are never redeemable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
  pub reward_id:   Uuid,
  pub title:       String,
  pub description: String,
  pub cost:        u32,
  pub reward_type: RewardType,
  pub is_active:   bool,
  /// Free-form payload interpreted by whatever fulfils the reward.
  pub metadata:    serde_json::Value,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::SparkStore::insert_reward`].
#[derive(Debug, Clone)]
pub struct NewReward {
  pub title:       String,
  pub description: String,
  pub cost:        u32,
  pub reward_type: RewardType,
  pub metadata:    serde_json::Value,
}

/// Records that a user exchanged points for a reward.
/// At most one redemption exists per (user, reward) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
  pub redemption_id: Uuid,
  pub user_id:       Uuid,
  pub reward_id:     Uuid,
  pub redeemed_at:   DateTime<Utc>,
  pub is_active:     bool,
}
