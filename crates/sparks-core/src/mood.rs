//! Mood tracking: the fixed mood vocabulary and the per-entry journal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of moods a user can report.
///
/// The quest selector only inspects [`Mood::Sad`] and [`Mood::Anxious`]
/// (point bonus); the rest exist for journalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
  Happy,
  Sad,
  Anxious,
  Calm,
  Excited,
  Tired,
  Frustrated,
  Inspired,
  Thoughtful,
}

/// A single mood journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
  pub entry_id:   Uuid,
  pub user_id:    Uuid,
  pub mood:       Mood,
  /// Subjective intensity on a 1 to 10 scale.
  pub intensity:  u8,
  pub notes:      Option<String>,
  pub triggers:   Vec<String>,
  pub activities: Vec<String>,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::SparkStore::insert_mood_entry`].
/// `created_at` is set by the store.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
  pub user_id:    Uuid,
  pub mood:       Mood,
  pub intensity:  u8,
  pub notes:      Option<String>,
  pub triggers:   Vec<String>,
  pub activities: Vec<String>,
}
