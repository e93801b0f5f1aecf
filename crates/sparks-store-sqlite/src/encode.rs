//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Tag lists, achievements,
//! and reward metadata are stored as compact JSON. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use sparks_core::{
  mood::{Mood, MoodEntry},
  quest::{Difficulty, Quest, QuestCategory, QuestType, Reflection},
  reward::{Redemption, Reward, RewardType},
  user::{Achievement, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── QuestCategory ───────────────────────────────────────────────────────────

pub fn encode_category(c: QuestCategory) -> &'static str {
  match c {
    QuestCategory::SelfLove => "self-love",
    QuestCategory::Mindfulness => "mindfulness",
    QuestCategory::Creativity => "creativity",
    QuestCategory::Social => "social",
    QuestCategory::Physical => "physical",
    QuestCategory::Emotional => "emotional",
    QuestCategory::Spiritual => "spiritual",
  }
}

pub fn decode_category(s: &str) -> Result<QuestCategory> {
  match s {
    "self-love" => Ok(QuestCategory::SelfLove),
    "mindfulness" => Ok(QuestCategory::Mindfulness),
    "creativity" => Ok(QuestCategory::Creativity),
    "social" => Ok(QuestCategory::Social),
    "physical" => Ok(QuestCategory::Physical),
    "emotional" => Ok(QuestCategory::Emotional),
    "spiritual" => Ok(QuestCategory::Spiritual),
    other => Err(Error::Decode(format!("unknown quest category: {other:?}"))),
  }
}

// ─── Difficulty ──────────────────────────────────────────────────────────────

pub fn encode_difficulty(d: Difficulty) -> &'static str {
  match d {
    Difficulty::Easy => "easy",
    Difficulty::Medium => "medium",
    Difficulty::Hard => "hard",
  }
}

pub fn decode_difficulty(s: &str) -> Result<Difficulty> {
  match s {
    "easy" => Ok(Difficulty::Easy),
    "medium" => Ok(Difficulty::Medium),
    "hard" => Ok(Difficulty::Hard),
    other => Err(Error::Decode(format!("unknown difficulty: {other:?}"))),
  }
}

// ─── QuestType ───────────────────────────────────────────────────────────────

pub fn encode_quest_type(t: QuestType) -> &'static str {
  match t {
    QuestType::Daily => "daily",
    QuestType::Weekly => "weekly",
    QuestType::Monthly => "monthly",
  }
}

pub fn decode_quest_type(s: &str) -> Result<QuestType> {
  match s {
    "daily" => Ok(QuestType::Daily),
    "weekly" => Ok(QuestType::Weekly),
    "monthly" => Ok(QuestType::Monthly),
    other => Err(Error::Decode(format!("unknown quest type: {other:?}"))),
  }
}

// ─── Mood ────────────────────────────────────────────────────────────────────

pub fn encode_mood(m: Mood) -> &'static str {
  match m {
    Mood::Happy => "happy",
    Mood::Sad => "sad",
    Mood::Anxious => "anxious",
    Mood::Calm => "calm",
    Mood::Excited => "excited",
    Mood::Tired => "tired",
    Mood::Frustrated => "frustrated",
    Mood::Inspired => "inspired",
    Mood::Thoughtful => "thoughtful",
  }
}

pub fn decode_mood(s: &str) -> Result<Mood> {
  match s {
    "happy" => Ok(Mood::Happy),
    "sad" => Ok(Mood::Sad),
    "anxious" => Ok(Mood::Anxious),
    "calm" => Ok(Mood::Calm),
    "excited" => Ok(Mood::Excited),
    "tired" => Ok(Mood::Tired),
    "frustrated" => Ok(Mood::Frustrated),
    "inspired" => Ok(Mood::Inspired),
    "thoughtful" => Ok(Mood::Thoughtful),
    other => Err(Error::Decode(format!("unknown mood: {other:?}"))),
  }
}

// ─── RewardType ──────────────────────────────────────────────────────────────

pub fn encode_reward_type(t: RewardType) -> &'static str {
  match t {
    RewardType::ProfileBoost => "profile_boost",
    RewardType::ExclusiveContent => "exclusive_content",
    RewardType::SpecialBadge => "special_badge",
    RewardType::PremiumFeature => "premium_feature",
  }
}

pub fn decode_reward_type(s: &str) -> Result<RewardType> {
  match s {
    "profile_boost" => Ok(RewardType::ProfileBoost),
    "exclusive_content" => Ok(RewardType::ExclusiveContent),
    "special_badge" => Ok(RewardType::SpecialBadge),
    "premium_feature" => Ok(RewardType::PremiumFeature),
    other => Err(Error::Decode(format!("unknown reward type: {other:?}"))),
  }
}

// ─── JSON-backed columns ─────────────────────────────────────────────────────

pub fn encode_string_list(list: &[String]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_achievements(list: &[Achievement]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

pub fn decode_achievements(s: &str) -> Result<Vec<Achievement>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_metadata(value: &serde_json::Value) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_metadata(s: &str) -> Result<serde_json::Value> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawUser`] field order.
pub const USER_COLUMNS: &str = "user_id, name, email, password_hash, bio, \
   personality_traits, emotional_needs, interests, goals, current_mood, \
   spark_points, onboarding_completed, last_quest_date, current_streak, \
   longest_streak, total_quests_completed, achievements, created_at";

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:                String,
  pub name:                   String,
  pub email:                  String,
  pub password_hash:          String,
  pub bio:                    Option<String>,
  pub personality_traits:     String,
  pub emotional_needs:        String,
  pub interests:              String,
  pub goals:                  String,
  pub current_mood:           Option<String>,
  pub spark_points:           i64,
  pub onboarding_completed:   bool,
  pub last_quest_date:        Option<String>,
  pub current_streak:         i64,
  pub longest_streak:         i64,
  pub total_quests_completed: i64,
  pub achievements:           String,
  pub created_at:             String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:                row.get(0)?,
      name:                   row.get(1)?,
      email:                  row.get(2)?,
      password_hash:          row.get(3)?,
      bio:                    row.get(4)?,
      personality_traits:     row.get(5)?,
      emotional_needs:        row.get(6)?,
      interests:              row.get(7)?,
      goals:                  row.get(8)?,
      current_mood:           row.get(9)?,
      spark_points:           row.get(10)?,
      onboarding_completed:   row.get(11)?,
      last_quest_date:        row.get(12)?,
      current_streak:         row.get(13)?,
      longest_streak:         row.get(14)?,
      total_quests_completed: row.get(15)?,
      achievements:           row.get(16)?,
      created_at:             row.get(17)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:                decode_uuid(&self.user_id)?,
      name:                   self.name,
      email:                  self.email,
      password_hash:          self.password_hash,
      bio:                    self.bio,
      personality_traits:     decode_string_list(&self.personality_traits)?,
      emotional_needs:        decode_string_list(&self.emotional_needs)?,
      interests:              decode_string_list(&self.interests)?,
      goals:                  decode_string_list(&self.goals)?,
      current_mood:           self
        .current_mood
        .as_deref()
        .map(decode_mood)
        .transpose()?,
      spark_points:           self.spark_points as u32,
      onboarding_completed:   self.onboarding_completed,
      last_quest_date:        self
        .last_quest_date
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      current_streak:         self.current_streak as u32,
      longest_streak:         self.longest_streak as u32,
      total_quests_completed: self.total_quests_completed as u32,
      achievements:           decode_achievements(&self.achievements)?,
      created_at:             decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawQuest`] field order.
pub const QUEST_COLUMNS: &str = "quest_id, user_id, title, description, \
   category, difficulty, points, completed, completed_at, reflection_text, \
   reflection_image_url, reflection_audio_url, quest_type, expires_at, \
   created_at";

/// Raw strings read directly from a `quests` row.
pub struct RawQuest {
  pub quest_id:             String,
  pub user_id:              String,
  pub title:                String,
  pub description:          String,
  pub category:             String,
  pub difficulty:           String,
  pub points:               i64,
  pub completed:            bool,
  pub completed_at:         Option<String>,
  pub reflection_text:      Option<String>,
  pub reflection_image_url: Option<String>,
  pub reflection_audio_url: Option<String>,
  pub quest_type:           String,
  pub expires_at:           Option<String>,
  pub created_at:           String,
}

impl RawQuest {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      quest_id:             row.get(0)?,
      user_id:              row.get(1)?,
      title:                row.get(2)?,
      description:          row.get(3)?,
      category:             row.get(4)?,
      difficulty:           row.get(5)?,
      points:               row.get(6)?,
      completed:            row.get(7)?,
      completed_at:         row.get(8)?,
      reflection_text:      row.get(9)?,
      reflection_image_url: row.get(10)?,
      reflection_audio_url: row.get(11)?,
      quest_type:           row.get(12)?,
      expires_at:           row.get(13)?,
      created_at:           row.get(14)?,
    })
  }

  pub fn into_quest(self) -> Result<Quest> {
    // Reflection columns only carry data once the quest is completed.
    let reflection = if self.completed {
      Some(Reflection {
        text:      self.reflection_text,
        image_url: self.reflection_image_url,
        audio_url: self.reflection_audio_url,
      })
    } else {
      None
    };

    Ok(Quest {
      quest_id: decode_uuid(&self.quest_id)?,
      user_id: decode_uuid(&self.user_id)?,
      title: self.title,
      description: self.description,
      category: decode_category(&self.category)?,
      difficulty: decode_difficulty(&self.difficulty)?,
      points: self.points as u32,
      completed: self.completed,
      completed_at: self.completed_at.as_deref().map(decode_dt).transpose()?,
      reflection,
      quest_type: decode_quest_type(&self.quest_type)?,
      expires_at: self.expires_at.as_deref().map(decode_dt).transpose()?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `rewards` row.
pub struct RawReward {
  pub reward_id:   String,
  pub title:       String,
  pub description: String,
  pub cost:        i64,
  pub reward_type: String,
  pub is_active:   bool,
  pub metadata:    String,
  pub created_at:  String,
}

impl RawReward {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      reward_id:   row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      cost:        row.get(3)?,
      reward_type: row.get(4)?,
      is_active:   row.get(5)?,
      metadata:    row.get(6)?,
      created_at:  row.get(7)?,
    })
  }

  pub fn into_reward(self) -> Result<Reward> {
    Ok(Reward {
      reward_id:   decode_uuid(&self.reward_id)?,
      title:       self.title,
      description: self.description,
      cost:        self.cost as u32,
      reward_type: decode_reward_type(&self.reward_type)?,
      is_active:   self.is_active,
      metadata:    decode_metadata(&self.metadata)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `redemptions` row.
pub struct RawRedemption {
  pub redemption_id: String,
  pub user_id:       String,
  pub reward_id:     String,
  pub redeemed_at:   String,
  pub is_active:     bool,
}

impl RawRedemption {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      redemption_id: row.get(0)?,
      user_id:       row.get(1)?,
      reward_id:     row.get(2)?,
      redeemed_at:   row.get(3)?,
      is_active:     row.get(4)?,
    })
  }

  pub fn into_redemption(self) -> Result<Redemption> {
    Ok(Redemption {
      redemption_id: decode_uuid(&self.redemption_id)?,
      user_id:       decode_uuid(&self.user_id)?,
      reward_id:     decode_uuid(&self.reward_id)?,
      redeemed_at:   decode_dt(&self.redeemed_at)?,
      is_active:     self.is_active,
    })
  }
}

/// Raw strings read directly from a `mood_entries` row.
pub struct RawMoodEntry {
  pub entry_id:   String,
  pub user_id:    String,
  pub mood:       String,
  pub intensity:  i64,
  pub notes:      Option<String>,
  pub triggers:   String,
  pub activities: String,
  pub created_at: String,
}

impl RawMoodEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      entry_id:   row.get(0)?,
      user_id:    row.get(1)?,
      mood:       row.get(2)?,
      intensity:  row.get(3)?,
      notes:      row.get(4)?,
      triggers:   row.get(5)?,
      activities: row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<MoodEntry> {
    Ok(MoodEntry {
      entry_id:   decode_uuid(&self.entry_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      mood:       decode_mood(&self.mood)?,
      intensity:  self.intensity as u8,
      notes:      self.notes,
      triggers:   decode_string_list(&self.triggers)?,
      activities: decode_string_list(&self.activities)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
