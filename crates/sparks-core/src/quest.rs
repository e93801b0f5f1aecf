//! Quest types: the assignable unit of growth activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

/// Growth category a quest belongs to.
///
/// `Spiritual` is reserved: the variant exists in the vocabulary but no
/// template table is defined for it, so the selector never assigns it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum QuestCategory {
  SelfLove,
  Mindfulness,
  Creativity,
  Social,
  Physical,
  Emotional,
  Spiritual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
  Daily,
  Weekly,
  Monthly,
}

/// User-submitted evidence attached to a completed quest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reflection {
  pub text:      Option<String>,
  pub image_url: Option<String>,
  pub audio_url: Option<String>,
}

impl Reflection {
  /// A reflection counts toward analytics only when it carries text.
  pub fn has_text(&self) -> bool {
    self.text.as_deref().is_some_and(|t| !t.is_empty())
  }
}

/// An assignable unit of activity.
///
/// `completed_at` is present iff `completed` is true, and `reflection` is
/// absent while the quest is incomplete. `points` is fixed at creation and
/// only read at completion. An incomplete quest past `expires_at` stays in
/// history but is no longer surfaced as the current quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
  pub quest_id:     Uuid,
  pub user_id:      Uuid,
  pub title:        String,
  pub description:  String,
  pub category:     QuestCategory,
  pub difficulty:   Difficulty,
  pub points:       u32,
  pub completed:    bool,
  pub completed_at: Option<DateTime<Utc>>,
  pub reflection:   Option<Reflection>,
  pub quest_type:   QuestType,
  pub expires_at:   Option<DateTime<Utc>>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::SparkStore::insert_quest`].
/// Quests are always created incomplete; `created_at` is set by the store.
#[derive(Debug, Clone)]
pub struct NewQuest {
  pub user_id:     Uuid,
  pub title:       String,
  pub description: String,
  pub category:    QuestCategory,
  pub difficulty:  Difficulty,
  pub points:      u32,
  pub quest_type:  QuestType,
  pub expires_at:  Option<DateTime<Utc>>,
}

/// Title/category projection of a quest, used for recency filtering in the
/// selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestSummary {
  pub title:    String,
  pub category: QuestCategory,
}
