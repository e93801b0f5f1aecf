//! SQL schema for the Solo Sparks SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id                TEXT PRIMARY KEY,
    name                   TEXT NOT NULL,
    email                  TEXT NOT NULL UNIQUE,
    password_hash          TEXT NOT NULL,   -- argon2 PHC string
    bio                    TEXT,
    personality_traits     TEXT NOT NULL DEFAULT '[]',
    emotional_needs        TEXT NOT NULL DEFAULT '[]',
    interests              TEXT NOT NULL DEFAULT '[]',
    goals                  TEXT NOT NULL DEFAULT '[]',
    current_mood           TEXT,
    spark_points           INTEGER NOT NULL DEFAULT 0
                           CHECK (spark_points >= 0),
    onboarding_completed   INTEGER NOT NULL DEFAULT 0,
    last_quest_date        TEXT,
    current_streak         INTEGER NOT NULL DEFAULT 0,
    longest_streak         INTEGER NOT NULL DEFAULT 0,
    total_quests_completed INTEGER NOT NULL DEFAULT 0,
    achievements           TEXT NOT NULL DEFAULT '[]',
    created_at             TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS quests (
    quest_id             TEXT PRIMARY KEY,
    user_id              TEXT NOT NULL REFERENCES users(user_id),
    title                TEXT NOT NULL,
    description          TEXT NOT NULL,
    category             TEXT NOT NULL,    -- 'self-love' | 'mindfulness' | ...
    difficulty           TEXT NOT NULL,    -- 'easy' | 'medium' | 'hard'
    points               INTEGER NOT NULL,
    completed            INTEGER NOT NULL DEFAULT 0,
    completed_at         TEXT,             -- set iff completed
    reflection_text      TEXT,
    reflection_image_url TEXT,
    reflection_audio_url TEXT,
    quest_type           TEXT NOT NULL DEFAULT 'daily',
    expires_at           TEXT,
    created_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rewards (
    reward_id   TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    cost        INTEGER NOT NULL,
    reward_type TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    metadata    TEXT NOT NULL DEFAULT '{}',
    created_at  TEXT NOT NULL
);

-- One redemption per (user, reward), enforced here as well as by the
-- handler-level existence check.
CREATE TABLE IF NOT EXISTS redemptions (
    redemption_id TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL REFERENCES users(user_id),
    reward_id     TEXT NOT NULL REFERENCES rewards(reward_id),
    redeemed_at   TEXT NOT NULL,
    is_active     INTEGER NOT NULL DEFAULT 1,
    UNIQUE (user_id, reward_id)
);

CREATE TABLE IF NOT EXISTS mood_entries (
    entry_id   TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    mood       TEXT NOT NULL,
    intensity  INTEGER NOT NULL CHECK (intensity BETWEEN 1 AND 10),
    notes      TEXT,
    triggers   TEXT NOT NULL DEFAULT '[]',
    activities TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS quests_user_completed_idx ON quests(user_id, completed);
CREATE INDEX IF NOT EXISTS quests_user_created_idx   ON quests(user_id, created_at);
CREATE INDEX IF NOT EXISTS redemptions_user_idx      ON redemptions(user_id);
CREATE INDEX IF NOT EXISTS mood_entries_user_idx     ON mood_entries(user_id, created_at);

PRAGMA user_version = 1;
";
