//! The `SparkStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `sparks-store-sqlite`). Handlers depend on this abstraction, not on any
//! concrete backend. Only per-document atomicity is assumed: multi-document
//! sequences (quest claim followed by a stats update, debit followed by a
//! ledger insert) are serialised per user by the caller, while the
//! conditional operations below keep even unserialised callers from
//! double-completing, overdrawing, or double-redeeming.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  mood::{Mood, MoodEntry, NewMoodEntry},
  progress::StatsUpdate,
  quest::{NewQuest, Quest, QuestSummary, Reflection},
  reward::{NewReward, Redemption, Reward},
  user::{NewUser, ProfileUpdate, User},
};

/// Abstraction over a Solo Sparks storage backend.
pub trait SparkStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a user with zero gamification state.
  /// Fails if the email address is already registered.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up a user by (lowercased) email address.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Apply a partial psychology-profile update and mark onboarding as
  /// completed. Returns the updated user, `None` if the user is missing.
  fn update_profile(
    &self,
    id: Uuid,
    update: ProfileUpdate,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Overwrite the user's current mood.
  fn set_current_mood(
    &self,
    id: Uuid,
    mood: Mood,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Write the gamification fields in one field-level update.
  fn update_stats(
    &self,
    id: Uuid,
    update: StatsUpdate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Conditionally deduct `cost` points. Returns `false` (and changes
  /// nothing) when the balance is below `cost`, so the balance can never
  /// go negative.
  fn try_debit_points(
    &self,
    id: Uuid,
    cost: u32,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Quests ────────────────────────────────────────────────────────────

  /// Persist a freshly selected quest. `created_at` is set by the store.
  fn insert_quest(
    &self,
    input: NewQuest,
  ) -> impl Future<Output = Result<Quest, Self::Error>> + Send + '_;

  /// Fetch a quest scoped to its owner. Returns `None` when the quest does
  /// not exist or belongs to someone else.
  fn get_quest(
    &self,
    quest_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<Quest>, Self::Error>> + Send + '_;

  /// Latest quests for a user, newest first.
  fn list_quests(
    &self,
    user_id: Uuid,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Quest>, Self::Error>> + Send + '_;

  /// The newest incomplete quest that has not expired as of `now`.
  fn current_quest(
    &self,
    user_id: Uuid,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Quest>, Self::Error>> + Send + '_;

  /// Title/category projections of quests created at or after `since`.
  fn recent_summaries(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<QuestSummary>, Self::Error>> + Send + '_;

  /// Atomically claim an incomplete quest: set the completed flag, stamp
  /// `completed_at`, and attach the reflection, all guarded on
  /// `completed` still being false. Returns `false` when the quest is
  /// missing, not owned by `user_id`, or already completed.
  fn complete_quest(
    &self,
    quest_id: Uuid,
    user_id: Uuid,
    completed_at: DateTime<Utc>,
    reflection: Reflection,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Completed quests whose completion stamp falls at or after `since`.
  fn completed_since(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Quest>, Self::Error>> + Send + '_;

  /// Number of completed quests for the user.
  fn count_completed(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of completed quests carrying a non-empty reflection text.
  fn count_reflections(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Sum of points over all completed quests.
  fn total_points_earned(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Rewards & redemptions ─────────────────────────────────────────────

  /// Number of rewards in the catalog, active or not.
  fn count_rewards(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Add a catalog entry. Used by boot-time seeding.
  fn insert_reward(
    &self,
    input: NewReward,
  ) -> impl Future<Output = Result<Reward, Self::Error>> + Send + '_;

  /// The reward catalog, optionally restricted to active entries.
  fn list_rewards(
    &self,
    active_only: bool,
  ) -> impl Future<Output = Result<Vec<Reward>, Self::Error>> + Send + '_;

  /// Retrieve a reward by id. Returns `None` if not found.
  fn get_reward(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Reward>, Self::Error>> + Send + '_;

  /// The redemption record for a (user, reward) pair, if one exists.
  fn find_redemption(
    &self,
    user_id: Uuid,
    reward_id: Uuid,
  ) -> impl Future<Output = Result<Option<Redemption>, Self::Error>> + Send + '_;

  /// All redemptions made by a user.
  fn redemptions_for_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Redemption>, Self::Error>> + Send + '_;

  /// Insert the (user, reward) ledger row. The backing store enforces
  /// at-most-once per pair and errors on a duplicate.
  fn insert_redemption(
    &self,
    user_id: Uuid,
    reward_id: Uuid,
  ) -> impl Future<Output = Result<Redemption, Self::Error>> + Send + '_;

  // ── Mood entries ──────────────────────────────────────────────────────

  /// Persist a mood journal entry. `created_at` is set by the store.
  fn insert_mood_entry(
    &self,
    input: NewMoodEntry,
  ) -> impl Future<Output = Result<MoodEntry, Self::Error>> + Send + '_;

  /// Mood entries recorded at or after `since`, newest first.
  fn mood_entries_since(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<MoodEntry>, Self::Error>> + Send + '_;
}
