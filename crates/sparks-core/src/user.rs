//! User: identity, psychology profile, and gamification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mood::Mood;

/// A badge earned by the user, stored inline on the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
  pub title:       String,
  pub description: String,
  pub earned_at:   DateTime<Utc>,
}

/// A registered user.
///
/// The psychology profile (trait/need/interest/goal tags) steers quest
/// selection. The gamification fields are mutated only by quest completion
/// and reward redemption; `spark_points` never goes negative and
/// `longest_streak` never falls below `current_streak` after an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:                Uuid,
  pub name:                   String,
  pub email:                  String,
  /// PHC string produced by argon2. Never serialised into API responses.
  #[serde(skip_serializing)]
  pub password_hash:          String,
  pub bio:                    Option<String>,
  pub personality_traits:     Vec<String>,
  pub emotional_needs:        Vec<String>,
  pub interests:              Vec<String>,
  pub goals:                  Vec<String>,
  pub current_mood:           Option<Mood>,
  pub spark_points:           u32,
  pub onboarding_completed:   bool,
  pub last_quest_date:        Option<DateTime<Utc>>,
  pub current_streak:         u32,
  pub longest_streak:         u32,
  pub total_quests_completed: u32,
  pub achievements:           Vec<Achievement>,
  pub created_at:             DateTime<Utc>,
}

/// Input to [`crate::store::SparkStore::create_user`].
///
/// Gamification state always starts at zero; `user_id` and `created_at`
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// Partial psychology-profile update. `None` fields are left untouched.
/// Applying any update marks onboarding as completed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
  pub bio:                Option<String>,
  pub personality_traits: Option<Vec<String>>,
  pub emotional_needs:    Option<Vec<String>>,
  pub interests:          Option<Vec<String>>,
  pub goals:              Option<Vec<String>>,
  pub current_mood:       Option<Mood>,
}
