//! Completion bookkeeping: the points/streak state machine applied when a
//! quest is completed.

use chrono::{DateTime, Utc};

use crate::user::User;

/// The gamification fields written back to the user after a completion.
/// Persisted as a single field-level update by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUpdate {
  pub spark_points:           u32,
  pub current_streak:         u32,
  pub longest_streak:         u32,
  pub total_quests_completed: u32,
  pub last_quest_date:        DateTime<Utc>,
}

/// Compute the user's state after completing a quest worth `points_earned`.
///
/// The streak is keyed on whole elapsed days between `last_quest_date` and
/// `now`: a gap of exactly one day extends it, a longer gap resets it to 1,
/// and a repeat completion on the same day leaves it unchanged (one streak
/// credit per day). `longest_streak` is raised whenever the current streak
/// passes it, so `current_streak <= longest_streak` holds after every
/// update.
pub fn apply_completion(
  user: &User,
  points_earned: u32,
  now: DateTime<Utc>,
) -> StatsUpdate {
  let mut current = user.current_streak;

  match user.last_quest_date {
    None => current = 1,
    Some(last) => {
      let days = (now - last).num_days();
      if days == 1 {
        current += 1;
      } else if days > 1 {
        current = 1;
      }
      // days == 0: same-day repeat, streak unchanged.
    }
  }

  StatsUpdate {
    spark_points:           user.spark_points + points_earned,
    current_streak:         current,
    longest_streak:         user.longest_streak.max(current),
    total_quests_completed: user.total_quests_completed + 1,
    last_quest_date:        now,
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone as _, Utc};
  use uuid::Uuid;

  use super::*;

  fn user_with(
    streak: u32,
    longest: u32,
    last: Option<DateTime<Utc>>,
  ) -> User {
    User {
      user_id:                Uuid::new_v4(),
      name:                   "Alice".into(),
      email:                  "alice@example.com".into(),
      password_hash:          String::new(),
      bio:                    None,
      personality_traits:     vec![],
      emotional_needs:        vec![],
      interests:              vec![],
      goals:                  vec![],
      current_mood:           None,
      spark_points:           40,
      onboarding_completed:   true,
      last_quest_date:        last,
      current_streak:         streak,
      longest_streak:         longest,
      total_quests_completed: 3,
      achievements:           vec![],
      created_at:             Utc::now(),
    }
  }

  fn noon(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
  }

  #[test]
  fn first_completion_starts_streak() {
    let user = user_with(0, 0, None);
    let update = apply_completion(&user, 15, noon(1));
    assert_eq!(update.current_streak, 1);
    assert_eq!(update.longest_streak, 1);
    assert_eq!(update.spark_points, 55);
    assert_eq!(update.total_quests_completed, 4);
    assert_eq!(update.last_quest_date, noon(1));
  }

  #[test]
  fn consecutive_days_extend_streak() {
    // Scenario: quests completed on two consecutive days.
    let user = user_with(1, 1, Some(noon(1)));
    let update = apply_completion(&user, 20, noon(2));
    assert_eq!(update.current_streak, 2);
    assert!(update.longest_streak >= 2);
  }

  #[test]
  fn two_day_gap_resets_streak() {
    let user = user_with(5, 5, Some(noon(1)));
    let update = apply_completion(&user, 20, noon(3));
    assert_eq!(update.current_streak, 1);
    assert_eq!(update.longest_streak, 5);
  }

  #[test]
  fn same_day_repeat_leaves_streak_unchanged() {
    let user = user_with(3, 4, Some(noon(5)));
    let update = apply_completion(&user, 10, noon(5) + Duration::hours(4));
    assert_eq!(update.current_streak, 3);
    assert_eq!(update.longest_streak, 4);
    // Points and counters still advance.
    assert_eq!(update.spark_points, 50);
    assert_eq!(update.total_quests_completed, 4);
  }

  #[test]
  fn longest_streak_never_decreases() {
    let mut user = user_with(0, 0, None);
    let mut longest_seen = 0;
    // Days 1, 2, 3, then a gap to 6, then 7.
    for day in [1, 2, 3, 6, 7] {
      let update = apply_completion(&user, 10, noon(day));
      assert!(update.longest_streak >= longest_seen);
      assert!(update.current_streak <= update.longest_streak);
      longest_seen = update.longest_streak;
      user.spark_points = update.spark_points;
      user.current_streak = update.current_streak;
      user.longest_streak = update.longest_streak;
      user.total_quests_completed = update.total_quests_completed;
      user.last_quest_date = Some(update.last_quest_date);
    }
    assert_eq!(longest_seen, 3);
    assert_eq!(user.current_streak, 2);
  }
}
