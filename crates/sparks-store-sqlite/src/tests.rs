//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use sparks_core::{
  catalog,
  mood::{Mood, NewMoodEntry},
  progress::StatsUpdate,
  quest::{Difficulty, NewQuest, QuestCategory, QuestType, Reflection},
  store::SparkStore,
  user::{NewUser, ProfileUpdate},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(email: &str) -> NewUser {
  NewUser {
    name:          "Alice".into(),
    email:         email.into(),
    password_hash: "$argon2id$fake".into(),
  }
}

fn daily_quest(user_id: Uuid, title: &str, points: u32) -> NewQuest {
  NewQuest {
    user_id,
    title: title.into(),
    description: "do the thing".into(),
    category: QuestCategory::Mindfulness,
    difficulty: Difficulty::Easy,
    points,
    quest_type: QuestType::Daily,
    expires_at: Some(Utc::now() + Duration::hours(24)),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;

  let user = s.create_user(new_user("alice@example.com")).await.unwrap();
  assert_eq!(user.spark_points, 0);
  assert_eq!(user.current_streak, 0);
  assert!(!user.onboarding_completed);

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.user_id, user.user_id);
  assert_eq!(fetched.email, "alice@example.com");
  assert!(fetched.achievements.is_empty());
}

#[tokio::test]
async fn email_is_stored_lowercase_and_unique() {
  let s = store().await;
  s.create_user(new_user("Alice@Example.COM")).await.unwrap();

  let found = s.find_user_by_email("alice@example.com").await.unwrap();
  assert!(found.is_some());

  // Case-insensitive lookup goes through the same lowering.
  let found = s.find_user_by_email("ALICE@example.com").await.unwrap();
  assert!(found.is_some());

  let dup = s.create_user(new_user("alice@example.com")).await;
  assert!(dup.is_err());
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_profile_sets_tags_and_onboarding() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();

  let updated = s
    .update_profile(user.user_id, ProfileUpdate {
      interests: Some(vec!["Meditation".into()]),
      current_mood: Some(Mood::Anxious),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert!(updated.onboarding_completed);
  assert_eq!(updated.interests, vec!["Meditation".to_string()]);
  assert_eq!(updated.current_mood, Some(Mood::Anxious));

  // Untouched fields survive a partial update.
  let again = s
    .update_profile(user.user_id, ProfileUpdate {
      goals: Some(vec!["Practice self-love".into()]),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(again.interests, vec!["Meditation".to_string()]);
  assert_eq!(again.goals, vec!["Practice self-love".to_string()]);
}

#[tokio::test]
async fn update_profile_missing_user_returns_none() {
  let s = store().await;
  let result = s
    .update_profile(Uuid::new_v4(), ProfileUpdate::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn update_stats_round_trips() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let now = Utc::now();

  s.update_stats(user.user_id, StatsUpdate {
    spark_points:           35,
    current_streak:         2,
    longest_streak:         4,
    total_quests_completed: 6,
    last_quest_date:        now,
  })
  .await
  .unwrap();

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.spark_points, 35);
  assert_eq!(fetched.current_streak, 2);
  assert_eq!(fetched.longest_streak, 4);
  assert_eq!(fetched.total_quests_completed, 6);
  assert_eq!(fetched.last_quest_date.unwrap(), now);
}

#[tokio::test]
async fn debit_respects_balance_floor() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  s.update_stats(user.user_id, StatsUpdate {
    spark_points:           50,
    current_streak:         0,
    longest_streak:         0,
    total_quests_completed: 0,
    last_quest_date:        Utc::now(),
  })
  .await
  .unwrap();

  // Scenario: balance 50, cost 100. The debit must not happen.
  assert!(!s.try_debit_points(user.user_id, 100).await.unwrap());
  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.spark_points, 50);

  assert!(s.try_debit_points(user.user_id, 50).await.unwrap());
  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.spark_points, 0);
}

// ─── Quests ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_quest_scoped_to_owner() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let other = s.create_user(new_user("b@example.com")).await.unwrap();

  let quest = s
    .insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();
  assert!(!quest.completed);
  assert!(quest.reflection.is_none());

  let fetched = s.get_quest(quest.quest_id, user.user_id).await.unwrap();
  assert!(fetched.is_some());

  // Another user cannot see it.
  let fetched = s.get_quest(quest.quest_id, other.user_id).await.unwrap();
  assert!(fetched.is_none());
}

#[tokio::test]
async fn current_quest_skips_completed_and_expired() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let now = Utc::now();

  // An expired quest is not current.
  let mut expired = daily_quest(user.user_id, "Digital Detox Hour", 18);
  expired.expires_at = Some(now - Duration::hours(1));
  s.insert_quest(expired).await.unwrap();
  assert!(s.current_quest(user.user_id, now).await.unwrap().is_none());

  // A live quest is.
  let live = s
    .insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();
  let current = s.current_quest(user.user_id, now).await.unwrap().unwrap();
  assert_eq!(current.quest_id, live.quest_id);

  // Once completed it is not surfaced again.
  s.complete_quest(live.quest_id, user.user_id, now, Reflection::default())
    .await
    .unwrap();
  assert!(s.current_quest(user.user_id, now).await.unwrap().is_none());
}

#[tokio::test]
async fn complete_quest_claims_exactly_once() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let quest = s
    .insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();
  let now = Utc::now();

  let reflection = Reflection {
    text:      Some("felt calm".into()),
    image_url: None,
    audio_url: None,
  };
  assert!(
    s.complete_quest(quest.quest_id, user.user_id, now, reflection)
      .await
      .unwrap()
  );

  // Second attempt finds no incomplete row.
  assert!(
    !s.complete_quest(quest.quest_id, user.user_id, now, Reflection::default())
      .await
      .unwrap()
  );

  let fetched = s.get_quest(quest.quest_id, user.user_id).await.unwrap().unwrap();
  assert!(fetched.completed);
  assert_eq!(fetched.completed_at.unwrap(), now);
  assert_eq!(fetched.reflection.unwrap().text.as_deref(), Some("felt calm"));
}

#[tokio::test]
async fn complete_quest_rejects_foreign_owner() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let other = s.create_user(new_user("b@example.com")).await.unwrap();
  let quest = s
    .insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();

  assert!(
    !s.complete_quest(quest.quest_id, other.user_id, Utc::now(), Reflection::default())
      .await
      .unwrap()
  );
}

#[tokio::test]
async fn list_quests_newest_first_with_limit() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();

  for i in 0..5 {
    s.insert_quest(daily_quest(user.user_id, &format!("Quest {i}"), 10))
      .await
      .unwrap();
  }

  let all = s.list_quests(user.user_id, 20).await.unwrap();
  assert_eq!(all.len(), 5);

  let limited = s.list_quests(user.user_id, 3).await.unwrap();
  assert_eq!(limited.len(), 3);
}

#[tokio::test]
async fn recent_summaries_filter_by_window() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  s.insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();

  let since = Utc::now() - Duration::days(7);
  let recent = s.recent_summaries(user.user_id, since).await.unwrap();
  assert_eq!(recent.len(), 1);
  assert_eq!(recent[0].title, "Sunset Meditation");
  assert_eq!(recent[0].category, QuestCategory::Mindfulness);

  let none = s
    .recent_summaries(user.user_id, Utc::now() + Duration::hours(1))
    .await
    .unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn completion_counters_and_point_totals() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let now = Utc::now();

  let q1 = s
    .insert_quest(daily_quest(user.user_id, "Sunset Meditation", 15))
    .await
    .unwrap();
  let q2 = s
    .insert_quest(daily_quest(user.user_id, "Digital Detox Hour", 18))
    .await
    .unwrap();
  s.insert_quest(daily_quest(user.user_id, "Mindful Eating Experience", 20))
    .await
    .unwrap();

  let with_text = Reflection {
    text:      Some("journal".into()),
    image_url: None,
    audio_url: None,
  };
  s.complete_quest(q1.quest_id, user.user_id, now, with_text)
    .await
    .unwrap();
  s.complete_quest(q2.quest_id, user.user_id, now, Reflection::default())
    .await
    .unwrap();

  assert_eq!(s.count_completed(user.user_id).await.unwrap(), 2);
  assert_eq!(s.count_reflections(user.user_id).await.unwrap(), 1);
  assert_eq!(s.total_points_earned(user.user_id).await.unwrap(), 33);

  let completed = s
    .completed_since(user.user_id, now - Duration::days(1))
    .await
    .unwrap();
  assert_eq!(completed.len(), 2);
}

// ─── Rewards & redemptions ───────────────────────────────────────────────────

#[tokio::test]
async fn reward_catalog_seeds_once() {
  let s = store().await;
  assert_eq!(s.count_rewards().await.unwrap(), 0);

  for reward in catalog::default_rewards() {
    s.insert_reward(reward).await.unwrap();
  }
  assert_eq!(s.count_rewards().await.unwrap(), 8);

  let active = s.list_rewards(true).await.unwrap();
  assert_eq!(active.len(), 8);
  assert!(active.windows(2).all(|w| w[0].cost <= w[1].cost));
}

#[tokio::test]
async fn redemption_is_unique_per_user_and_reward() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();
  let reward = s
    .insert_reward(catalog::default_rewards().remove(0))
    .await
    .unwrap();

  assert!(
    s.find_redemption(user.user_id, reward.reward_id)
      .await
      .unwrap()
      .is_none()
  );

  s.insert_redemption(user.user_id, reward.reward_id)
    .await
    .unwrap();

  let found = s
    .find_redemption(user.user_id, reward.reward_id)
    .await
    .unwrap();
  assert!(found.is_some());

  // The UNIQUE constraint backs up the handler-level existence check.
  let dup = s.insert_redemption(user.user_id, reward.reward_id).await;
  assert!(dup.is_err());

  let all = s.redemptions_for_user(user.user_id).await.unwrap();
  assert_eq!(all.len(), 1);
}

// ─── Mood entries ────────────────────────────────────────────────────────────

#[tokio::test]
async fn mood_entries_round_trip() {
  let s = store().await;
  let user = s.create_user(new_user("a@example.com")).await.unwrap();

  let entry = s
    .insert_mood_entry(NewMoodEntry {
      user_id:    user.user_id,
      mood:       Mood::Inspired,
      intensity:  7,
      notes:      Some("good day".into()),
      triggers:   vec!["sunshine".into()],
      activities: vec!["walking".into()],
    })
    .await
    .unwrap();

  let since = Utc::now() - Duration::days(30);
  let history = s.mood_entries_since(user.user_id, since).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].entry_id, entry.entry_id);
  assert_eq!(history[0].mood, Mood::Inspired);
  assert_eq!(history[0].intensity, 7);
  assert_eq!(history[0].triggers, vec!["sunshine".to_string()]);
}
