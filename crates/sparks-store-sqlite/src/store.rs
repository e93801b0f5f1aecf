//! [`SqliteStore`]: the SQLite implementation of [`SparkStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use sparks_core::{
  mood::{Mood, MoodEntry, NewMoodEntry},
  progress::StatsUpdate,
  quest::{NewQuest, Quest, QuestSummary, Reflection},
  reward::{NewReward, Redemption, Reward},
  store::SparkStore,
  user::{NewUser, ProfileUpdate, User},
};

use crate::{
  Error, Result,
  encode::{
    QUEST_COLUMNS, RawMoodEntry, RawQuest, RawRedemption, RawReward, RawUser,
    USER_COLUMNS, encode_achievements, encode_category, encode_difficulty,
    encode_dt, encode_metadata, encode_mood, encode_quest_type,
    encode_reward_type, encode_string_list, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Solo Sparks store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store. Useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn user_where(
    &self,
    column: &'static str,
    value: String,
  ) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        let sql =
          format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![value], RawUser::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}

// ─── SparkStore impl ─────────────────────────────────────────────────────────

impl SparkStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:                Uuid::new_v4(),
      name:                   input.name,
      email:                  input.email.to_lowercase(),
      password_hash:          input.password_hash,
      bio:                    None,
      personality_traits:     Vec::new(),
      emotional_needs:        Vec::new(),
      interests:              Vec::new(),
      goals:                  Vec::new(),
      current_mood:           None,
      spark_points:           0,
      onboarding_completed:   false,
      last_quest_date:        None,
      current_streak:         0,
      longest_streak:         0,
      total_quests_completed: 0,
      achievements:           Vec::new(),
      created_at:             Utc::now(),
    };

    let id_str = encode_uuid(user.user_id);
    let name = user.name.clone();
    let email = user.email.clone();
    let hash = user.password_hash.clone();
    let tags_str = encode_string_list(&[])?;
    let achievements_str = encode_achievements(&user.achievements)?;
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, name, email, password_hash, personality_traits,
             emotional_needs, interests, goals, achievements, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?5, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            name,
            email,
            hash,
            tags_str,
            achievements_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    self.user_where("user_id", encode_uuid(id)).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    self.user_where("email", email.to_lowercase()).await
  }

  async fn update_profile(
    &self,
    id: Uuid,
    update: ProfileUpdate,
  ) -> Result<Option<User>> {
    let mut user = match self.get_user(id).await? {
      Some(u) => u,
      None => return Ok(None),
    };

    if let Some(bio) = update.bio {
      user.bio = Some(bio);
    }
    if let Some(traits) = update.personality_traits {
      user.personality_traits = traits;
    }
    if let Some(needs) = update.emotional_needs {
      user.emotional_needs = needs;
    }
    if let Some(interests) = update.interests {
      user.interests = interests;
    }
    if let Some(goals) = update.goals {
      user.goals = goals;
    }
    if let Some(mood) = update.current_mood {
      user.current_mood = Some(mood);
    }
    user.onboarding_completed = true;

    let id_str = encode_uuid(id);
    let bio = user.bio.clone();
    let traits_str = encode_string_list(&user.personality_traits)?;
    let needs_str = encode_string_list(&user.emotional_needs)?;
    let interests_str = encode_string_list(&user.interests)?;
    let goals_str = encode_string_list(&user.goals)?;
    let mood_str = user.current_mood.map(encode_mood);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET
             bio = ?1, personality_traits = ?2, emotional_needs = ?3,
             interests = ?4, goals = ?5, current_mood = ?6,
             onboarding_completed = 1
           WHERE user_id = ?7",
          rusqlite::params![
            bio,
            traits_str,
            needs_str,
            interests_str,
            goals_str,
            mood_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(user))
  }

  async fn set_current_mood(&self, id: Uuid, mood: Mood) -> Result<()> {
    let id_str = encode_uuid(id);
    let mood_str = encode_mood(mood);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET current_mood = ?1 WHERE user_id = ?2",
          rusqlite::params![mood_str, id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_stats(&self, id: Uuid, update: StatsUpdate) -> Result<()> {
    let id_str = encode_uuid(id);
    let last_str = encode_dt(update.last_quest_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET
             spark_points = ?1, current_streak = ?2, longest_streak = ?3,
             total_quests_completed = ?4, last_quest_date = ?5
           WHERE user_id = ?6",
          rusqlite::params![
            update.spark_points as i64,
            update.current_streak as i64,
            update.longest_streak as i64,
            update.total_quests_completed as i64,
            last_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn try_debit_points(&self, id: Uuid, cost: u32) -> Result<bool> {
    let id_str = encode_uuid(id);

    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET spark_points = spark_points - ?1
           WHERE user_id = ?2 AND spark_points >= ?1",
          rusqlite::params![cost as i64, id_str],
        )?)
      })
      .await?;

    Ok(rows == 1)
  }

  // ── Quests ────────────────────────────────────────────────────────────

  async fn insert_quest(&self, input: NewQuest) -> Result<Quest> {
    let quest = Quest {
      quest_id:     Uuid::new_v4(),
      user_id:      input.user_id,
      title:        input.title,
      description:  input.description,
      category:     input.category,
      difficulty:   input.difficulty,
      points:       input.points,
      completed:    false,
      completed_at: None,
      reflection:   None,
      quest_type:   input.quest_type,
      expires_at:   input.expires_at,
      created_at:   Utc::now(),
    };

    let id_str = encode_uuid(quest.quest_id);
    let user_str = encode_uuid(quest.user_id);
    let title = quest.title.clone();
    let description = quest.description.clone();
    let category = encode_category(quest.category);
    let difficulty = encode_difficulty(quest.difficulty);
    let quest_type = encode_quest_type(quest.quest_type);
    let expires_str = quest.expires_at.map(encode_dt);
    let created_str = encode_dt(quest.created_at);
    let points = quest.points as i64;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO quests (
             quest_id, user_id, title, description, category, difficulty,
             points, quest_type, expires_at, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            user_str,
            title,
            description,
            category,
            difficulty,
            points,
            quest_type,
            expires_str,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(quest)
  }

  async fn get_quest(
    &self,
    quest_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Quest>> {
    let quest_str = encode_uuid(quest_id);
    let user_str = encode_uuid(user_id);

    let raw: Option<RawQuest> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUEST_COLUMNS} FROM quests
           WHERE quest_id = ?1 AND user_id = ?2"
        );
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params![quest_str, user_str],
              RawQuest::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuest::into_quest).transpose()
  }

  async fn list_quests(&self, user_id: Uuid, limit: usize) -> Result<Vec<Quest>> {
    let user_str = encode_uuid(user_id);
    let limit = limit as i64;

    let raws: Vec<RawQuest> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUEST_COLUMNS} FROM quests
           WHERE user_id = ?1
           ORDER BY created_at DESC
           LIMIT ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user_str, limit], RawQuest::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuest::into_quest).collect()
  }

  async fn current_quest(
    &self,
    user_id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<Option<Quest>> {
    let user_str = encode_uuid(user_id);
    let now_str = encode_dt(now);

    let raw: Option<RawQuest> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUEST_COLUMNS} FROM quests
           WHERE user_id = ?1
             AND completed = 0
             AND (expires_at IS NULL OR expires_at > ?2)
           ORDER BY created_at DESC
           LIMIT 1"
        );
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params![user_str, now_str],
              RawQuest::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuest::into_quest).transpose()
  }

  async fn recent_summaries(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> Result<Vec<QuestSummary>> {
    let user_str = encode_uuid(user_id);
    let since_str = encode_dt(since);

    let rows: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT title, category FROM quests
           WHERE user_id = ?1 AND created_at >= ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str, since_str], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(title, category)| {
        Ok(QuestSummary {
          title,
          category: crate::encode::decode_category(&category)?,
        })
      })
      .collect()
  }

  async fn complete_quest(
    &self,
    quest_id: Uuid,
    user_id: Uuid,
    completed_at: DateTime<Utc>,
    reflection: Reflection,
  ) -> Result<bool> {
    let quest_str = encode_uuid(quest_id);
    let user_str = encode_uuid(user_id);
    let at_str = encode_dt(completed_at);

    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE quests SET
             completed = 1, completed_at = ?1, reflection_text = ?2,
             reflection_image_url = ?3, reflection_audio_url = ?4
           WHERE quest_id = ?5 AND user_id = ?6 AND completed = 0",
          rusqlite::params![
            at_str,
            reflection.text,
            reflection.image_url,
            reflection.audio_url,
            quest_str,
            user_str,
          ],
        )?)
      })
      .await?;

    Ok(rows == 1)
  }

  async fn completed_since(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> Result<Vec<Quest>> {
    let user_str = encode_uuid(user_id);
    let since_str = encode_dt(since);

    let raws: Vec<RawQuest> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUEST_COLUMNS} FROM quests
           WHERE user_id = ?1 AND completed = 1 AND completed_at >= ?2
           ORDER BY completed_at ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![user_str, since_str],
            RawQuest::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuest::into_quest).collect()
  }

  async fn count_completed(&self, user_id: Uuid) -> Result<u64> {
    let user_str = encode_uuid(user_id);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM quests WHERE user_id = ?1 AND completed = 1",
          rusqlite::params![user_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn count_reflections(&self, user_id: Uuid) -> Result<u64> {
    let user_str = encode_uuid(user_id);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM quests
           WHERE user_id = ?1 AND completed = 1
             AND reflection_text IS NOT NULL AND reflection_text != ''",
          rusqlite::params![user_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn total_points_earned(&self, user_id: Uuid) -> Result<u64> {
    let user_str = encode_uuid(user_id);

    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(points), 0) FROM quests
           WHERE user_id = ?1 AND completed = 1",
          rusqlite::params![user_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(total as u64)
  }

  // ── Rewards & redemptions ─────────────────────────────────────────────

  async fn count_rewards(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM rewards", [], |row| {
          row.get(0)
        })?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn insert_reward(&self, input: NewReward) -> Result<Reward> {
    let reward = Reward {
      reward_id:   Uuid::new_v4(),
      title:       input.title,
      description: input.description,
      cost:        input.cost,
      reward_type: input.reward_type,
      is_active:   true,
      metadata:    input.metadata,
      created_at:  Utc::now(),
    };

    let id_str = encode_uuid(reward.reward_id);
    let title = reward.title.clone();
    let description = reward.description.clone();
    let cost = reward.cost as i64;
    let type_str = encode_reward_type(reward.reward_type);
    let metadata_str = encode_metadata(&reward.metadata)?;
    let at_str = encode_dt(reward.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO rewards (
             reward_id, title, description, cost, reward_type, is_active,
             metadata, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
          rusqlite::params![
            id_str,
            title,
            description,
            cost,
            type_str,
            metadata_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(reward)
  }

  async fn list_rewards(&self, active_only: bool) -> Result<Vec<Reward>> {
    let raws: Vec<RawReward> = self
      .conn
      .call(move |conn| {
        let sql = if active_only {
          "SELECT reward_id, title, description, cost, reward_type,
                  is_active, metadata, created_at
           FROM rewards WHERE is_active = 1 ORDER BY cost ASC"
        } else {
          "SELECT reward_id, title, description, cost, reward_type,
                  is_active, metadata, created_at
           FROM rewards ORDER BY cost ASC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], RawReward::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReward::into_reward).collect()
  }

  async fn get_reward(&self, id: Uuid) -> Result<Option<Reward>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawReward> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT reward_id, title, description, cost, reward_type,
                      is_active, metadata, created_at
               FROM rewards WHERE reward_id = ?1",
              rusqlite::params![id_str],
              RawReward::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReward::into_reward).transpose()
  }

  async fn find_redemption(
    &self,
    user_id: Uuid,
    reward_id: Uuid,
  ) -> Result<Option<Redemption>> {
    let user_str = encode_uuid(user_id);
    let reward_str = encode_uuid(reward_id);

    let raw: Option<RawRedemption> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT redemption_id, user_id, reward_id, redeemed_at, is_active
               FROM redemptions WHERE user_id = ?1 AND reward_id = ?2",
              rusqlite::params![user_str, reward_str],
              RawRedemption::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRedemption::into_redemption).transpose()
  }

  async fn redemptions_for_user(&self, user_id: Uuid) -> Result<Vec<Redemption>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawRedemption> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT redemption_id, user_id, reward_id, redeemed_at, is_active
           FROM redemptions WHERE user_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], RawRedemption::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRedemption::into_redemption).collect()
  }

  async fn insert_redemption(
    &self,
    user_id: Uuid,
    reward_id: Uuid,
  ) -> Result<Redemption> {
    let redemption = Redemption {
      redemption_id: Uuid::new_v4(),
      user_id,
      reward_id,
      redeemed_at: Utc::now(),
      is_active: true,
    };

    let id_str = encode_uuid(redemption.redemption_id);
    let user_str = encode_uuid(user_id);
    let reward_str = encode_uuid(reward_id);
    let at_str = encode_dt(redemption.redeemed_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO redemptions (
             redemption_id, user_id, reward_id, redeemed_at, is_active
           ) VALUES (?1, ?2, ?3, ?4, 1)",
          rusqlite::params![id_str, user_str, reward_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(redemption)
  }

  // ── Mood entries ──────────────────────────────────────────────────────

  async fn insert_mood_entry(&self, input: NewMoodEntry) -> Result<MoodEntry> {
    let entry = MoodEntry {
      entry_id:   Uuid::new_v4(),
      user_id:    input.user_id,
      mood:       input.mood,
      intensity:  input.intensity,
      notes:      input.notes,
      triggers:   input.triggers,
      activities: input.activities,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(entry.entry_id);
    let user_str = encode_uuid(entry.user_id);
    let mood_str = encode_mood(entry.mood);
    let intensity = entry.intensity as i64;
    let notes = entry.notes.clone();
    let triggers_str = encode_string_list(&entry.triggers)?;
    let activities_str = encode_string_list(&entry.activities)?;
    let at_str = encode_dt(entry.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO mood_entries (
             entry_id, user_id, mood, intensity, notes, triggers,
             activities, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            user_str,
            mood_str,
            intensity,
            notes,
            triggers_str,
            activities_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  async fn mood_entries_since(
    &self,
    user_id: Uuid,
    since: DateTime<Utc>,
  ) -> Result<Vec<MoodEntry>> {
    let user_str = encode_uuid(user_id);
    let since_str = encode_dt(since);

    let raws: Vec<RawMoodEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, user_id, mood, intensity, notes, triggers,
                  activities, created_at
           FROM mood_entries
           WHERE user_id = ?1 AND created_at >= ?2
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![user_str, since_str],
            RawMoodEntry::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMoodEntry::into_entry).collect()
  }
}
