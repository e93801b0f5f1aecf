//! Read-only progress aggregation over completed quests.
//!
//! Nothing here mutates state; the handlers fetch completed quests from
//! the store and aggregate with these functions.

use chrono::{DateTime, Datelike as _, Duration, Months, Utc};
use serde::Serialize;

use crate::quest::Quest;

/// Points and completions on one day of the trailing week.
#[derive(Debug, Clone, Serialize)]
pub struct DayProgress {
  /// Short weekday label, e.g. `"Mon"`.
  pub day:    String,
  pub points: u32,
  pub quests: usize,
}

/// Completions within one month of the trailing half year.
#[derive(Debug, Clone, Serialize)]
pub struct MonthStat {
  /// Short month label, e.g. `"Jan"`.
  pub month:     String,
  pub completed: usize,
}

/// Per-day totals for the 7 days ending at `now`, oldest first.
pub fn weekly_progress(
  completed: &[Quest],
  now: DateTime<Utc>,
) -> Vec<DayProgress> {
  (0..7i64)
    .rev()
    .map(|back| {
      let day = (now - Duration::days(back)).date_naive();
      let on_day = completed
        .iter()
        .filter(|q| q.completed_at.is_some_and(|at| at.date_naive() == day));
      let (mut points, mut quests) = (0u32, 0usize);
      for q in on_day {
        points += q.points;
        quests += 1;
      }
      DayProgress { day: day.format("%a").to_string(), points, quests }
    })
    .collect()
}

/// Per-month completion counts for the 6 months ending at `now`, oldest
/// first.
pub fn monthly_stats(
  completed: &[Quest],
  now: DateTime<Utc>,
) -> Vec<MonthStat> {
  (0..6u32)
    .rev()
    .map(|back| {
      let anchor = now.checked_sub_months(Months::new(back)).unwrap_or(now);
      let bucket = (anchor.year(), anchor.month());
      let count = completed
        .iter()
        .filter(|q| {
          q.completed_at
            .is_some_and(|at| (at.year(), at.month()) == bucket)
        })
        .count();
      MonthStat { month: anchor.format("%b").to_string(), completed: count }
    })
    .collect()
}

/// Heuristic 0 to 100 growth score over completion volume, streak length,
/// and reflection habit.
pub fn growth_score(
  completed_quests: u64,
  current_streak: u32,
  total_reflections: u64,
) -> u32 {
  let raw =
    completed_quests * 2 + u64::from(current_streak) * 5 + total_reflections * 3;
  raw.min(100) as u32
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;
  use uuid::Uuid;

  use super::*;
  use crate::quest::{Difficulty, QuestCategory, QuestType, Reflection};

  fn completed_quest(points: u32, at: DateTime<Utc>) -> Quest {
    Quest {
      quest_id:     Uuid::new_v4(),
      user_id:      Uuid::new_v4(),
      title:        "Sunset Meditation".into(),
      description:  "watch the sunset".into(),
      category:     QuestCategory::Mindfulness,
      difficulty:   Difficulty::Easy,
      points,
      completed:    true,
      completed_at: Some(at),
      reflection:   Some(Reflection::default()),
      quest_type:   QuestType::Daily,
      expires_at:   None,
      created_at:   at,
    }
  }

  #[test]
  fn weekly_progress_buckets_by_day() {
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 18, 0, 0).unwrap();
    let quests = vec![
      completed_quest(15, now - Duration::days(1)),
      completed_quest(20, now - Duration::days(1)),
      completed_quest(10, now),
      // Outside the window.
      completed_quest(50, now - Duration::days(8)),
    ];

    let progress = weekly_progress(&quests, now);
    assert_eq!(progress.len(), 7);
    assert_eq!(progress[6].points, 10);
    assert_eq!(progress[6].quests, 1);
    assert_eq!(progress[5].points, 35);
    assert_eq!(progress[5].quests, 2);
    assert_eq!(progress[0].points, 0);
    let total: u32 = progress.iter().map(|d| d.points).sum();
    assert_eq!(total, 45);
  }

  #[test]
  fn monthly_stats_cover_six_months() {
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
    let quests = vec![
      completed_quest(10, now),
      completed_quest(10, Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap()),
      completed_quest(10, Utc.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap()),
      // Older than the window.
      completed_quest(10, Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap()),
    ];

    let stats = monthly_stats(&quests, now);
    assert_eq!(stats.len(), 6);
    assert_eq!(stats[0].month, "Jan");
    assert_eq!(stats[0].completed, 1);
    assert_eq!(stats[4].completed, 1);
    assert_eq!(stats[5].month, "Jun");
    assert_eq!(stats[5].completed, 1);
    assert_eq!(stats[1].completed + stats[2].completed + stats[3].completed, 0);
  }

  #[test]
  fn growth_score_combines_factors() {
    assert_eq!(growth_score(0, 0, 0), 0);
    assert_eq!(growth_score(10, 2, 5), 45);
  }

  #[test]
  fn growth_score_clamps_at_one_hundred() {
    assert_eq!(growth_score(1000, 50, 1000), 100);
  }
}
