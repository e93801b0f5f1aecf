//! Static quest and reward catalogs.
//!
//! Template tables are immutable process-wide constants looked up by
//! category. The selector treats them as read-only configuration.

use serde_json::json;
use strum::IntoEnumIterator as _;

use crate::{
  quest::{Difficulty, QuestCategory},
  reward::{NewReward, RewardType},
};

/// A daily quest blueprint.
#[derive(Debug, Clone, Copy)]
pub struct QuestTemplate {
  pub title:       &'static str,
  pub description: &'static str,
  pub points:      u32,
  pub difficulty:  Difficulty,
}

/// A weekly quest blueprint. Weekly templates carry their own category.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyTemplate {
  pub title:       &'static str,
  pub description: &'static str,
  pub category:    QuestCategory,
  pub points:      u32,
  pub difficulty:  Difficulty,
}

const SELF_LOVE: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Mirror Affirmation Challenge",
    description: "Look in the mirror and say three genuine compliments to \
                  yourself. Focus on your character, not just appearance.",
    points:      15,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Solo Date Adventure",
    description: "Take yourself on a proper date. Dress up, go somewhere \
                  nice, and enjoy your own company without distractions.",
    points:      25,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Self-Forgiveness Letter",
    description: "Write a compassionate letter to yourself, forgiving past \
                  mistakes and acknowledging your growth.",
    points:      20,
    difficulty:  Difficulty::Medium,
  },
];

const MINDFULNESS: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Sunset Meditation",
    description: "Find a peaceful spot to watch the sunset. Spend 10 minutes \
                  in silent reflection about your day.",
    points:      15,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Mindful Eating Experience",
    description: "Eat one meal today in complete silence, focusing on every \
                  taste, texture, and sensation.",
    points:      20,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Digital Detox Hour",
    description: "Spend one hour completely disconnected from all devices. \
                  Use this time for self-reflection.",
    points:      18,
    difficulty:  Difficulty::Medium,
  },
];

const CREATIVITY: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Express Your Emotions",
    description: "Create something artistic (draw, write, sing, dance) that \
                  represents how you feel right now.",
    points:      22,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Random Acts of Beauty",
    description: "Create something beautiful and leave it for a stranger to \
                  find (origami, chalk art, etc.).",
    points:      25,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Memory Lane Creation",
    description: "Create a visual representation of your favorite childhood \
                  memory using any medium you choose.",
    points:      20,
    difficulty:  Difficulty::Easy,
  },
];

const SOCIAL: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Compliment a Stranger",
    description: "Give a genuine, thoughtful compliment to someone you don't \
                  know. Notice how it makes you both feel.",
    points:      18,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Reconnect with Someone",
    description: "Reach out to someone you haven't spoken to in a while. \
                  Share something meaningful about your life.",
    points:      20,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Practice Active Listening",
    description: "Have a conversation where you focus entirely on listening \
                  without planning your response.",
    points:      15,
    difficulty:  Difficulty::Easy,
  },
];

const PHYSICAL: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Nature Walk Reflection",
    description: "Take a 30-minute walk in nature without music or podcasts. \
                  Focus on your thoughts and surroundings.",
    points:      15,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Body Appreciation Exercise",
    description: "Do a gentle stretching routine while mentally thanking \
                  each part of your body for what it does.",
    points:      18,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Dance Like Nobody's Watching",
    description: "Put on your favorite music and dance freely for 10 \
                  minutes. Let go of self-consciousness.",
    points:      20,
    difficulty:  Difficulty::Medium,
  },
];

const EMOTIONAL: &[QuestTemplate] = &[
  QuestTemplate {
    title:       "Emotion Mapping",
    description: "Create a visual map of your emotions today. Use colors, \
                  shapes, or words to represent your feelings.",
    points:      20,
    difficulty:  Difficulty::Medium,
  },
  QuestTemplate {
    title:       "Gratitude Deep Dive",
    description: "Write about three things you're grateful for and explain \
                  in detail why each one matters to you.",
    points:      15,
    difficulty:  Difficulty::Easy,
  },
  QuestTemplate {
    title:       "Fear Facing Exercise",
    description: "Identify one small fear and take a tiny step toward facing \
                  it today. Reflect on the experience.",
    points:      25,
    difficulty:  Difficulty::Hard,
  },
];

/// Weekly quests are longer-form challenges drawn from a single pool.
pub const WEEKLY_TEMPLATES: &[WeeklyTemplate] = &[
  WeeklyTemplate {
    title:       "Week of Self-Discovery",
    description: "Each day this week, try one new activity that you've never \
                  done before. Document your experiences.",
    category:    QuestCategory::SelfLove,
    points:      50,
    difficulty:  Difficulty::Medium,
  },
  WeeklyTemplate {
    title:       "Mindfulness Challenge",
    description: "Practice 10 minutes of mindfulness meditation every day \
                  for a week. Track your progress.",
    category:    QuestCategory::Mindfulness,
    points:      60,
    difficulty:  Difficulty::Hard,
  },
  WeeklyTemplate {
    title:       "Creative Expression Week",
    description: "Create something artistic every day for a week. It can be \
                  anything - writing, drawing, music, etc.",
    category:    QuestCategory::Creativity,
    points:      55,
    difficulty:  Difficulty::Medium,
  },
];

/// Daily templates for `category`. Reserved categories have no table yet.
pub fn templates_for(category: QuestCategory) -> &'static [QuestTemplate] {
  match category {
    QuestCategory::SelfLove => SELF_LOVE,
    QuestCategory::Mindfulness => MINDFULNESS,
    QuestCategory::Creativity => CREATIVITY,
    QuestCategory::Social => SOCIAL,
    QuestCategory::Physical => PHYSICAL,
    QuestCategory::Emotional => EMOTIONAL,
    QuestCategory::Spiritual => &[],
  }
}

/// Categories the selector may assign: every category with a template
/// table.
pub fn assignable_categories() -> Vec<QuestCategory> {
  QuestCategory::iter()
    .filter(|c| !templates_for(*c).is_empty())
    .collect()
}

/// The reward catalog seeded at boot when the rewards table is empty.
pub fn default_rewards() -> Vec<NewReward> {
  vec![
    NewReward {
      title:       "Profile Spotlight".into(),
      description: "Boost your profile visibility for 24 hours".into(),
      cost:        100,
      reward_type: RewardType::ProfileBoost,
      metadata:    json!({ "duration": 24 }),
    },
    NewReward {
      title:       "Self-Love Champion Badge".into(),
      description: "Unlock a special \"Self-Love Champion\" badge for your \
                    profile"
        .into(),
      cost:        150,
      reward_type: RewardType::SpecialBadge,
      metadata:    json!({ "badge_type": "self_love_champion" }),
    },
    NewReward {
      title:       "Premium Content Access".into(),
      description: "Access exclusive self-growth articles and videos for 30 \
                    days"
        .into(),
      cost:        200,
      reward_type: RewardType::ExclusiveContent,
      metadata:    json!({ "duration": 30 }),
    },
    NewReward {
      title:       "Advanced Analytics".into(),
      description: "Unlock detailed progress analytics and insights".into(),
      cost:        250,
      reward_type: RewardType::PremiumFeature,
      metadata:    json!({ "feature": "advanced_analytics" }),
    },
    NewReward {
      title:       "Custom Quest Creator".into(),
      description: "Create and customize your own personal growth quests"
        .into(),
      cost:        300,
      reward_type: RewardType::PremiumFeature,
      metadata:    json!({ "feature": "custom_quests" }),
    },
    NewReward {
      title:       "Mindfulness Master Badge".into(),
      description: "Special badge for completing 50 mindfulness quests"
        .into(),
      cost:        500,
      reward_type: RewardType::SpecialBadge,
      metadata:    json!({ "badge_type": "mindfulness_master" }),
    },
    NewReward {
      title:       "Growth Guru Status".into(),
      description: "Unlock exclusive Growth Guru status and special features"
        .into(),
      cost:        750,
      reward_type: RewardType::PremiumFeature,
      metadata:    json!({ "feature": "guru_status" }),
    },
    NewReward {
      title:       "Emotional Intelligence Badge".into(),
      description: "Badge for mastering emotional intelligence quests".into(),
      cost:        400,
      reward_type: RewardType::SpecialBadge,
      metadata:    json!({ "badge_type": "emotional_intelligence" }),
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_assignable_category_has_templates() {
    let cats = assignable_categories();
    assert_eq!(cats.len(), 6);
    assert!(!cats.contains(&QuestCategory::Spiritual));
    for cat in cats {
      assert!(!templates_for(cat).is_empty());
    }
  }

  #[test]
  fn template_points_are_positive() {
    for cat in assignable_categories() {
      for t in templates_for(cat) {
        assert!(t.points > 0, "{} has zero points", t.title);
      }
    }
    for t in WEEKLY_TEMPLATES {
      assert!(t.points > 0);
    }
  }

  #[test]
  fn default_rewards_match_catalog_size() {
    let rewards = default_rewards();
    assert_eq!(rewards.len(), 8);
    assert!(rewards.iter().all(|r| r.cost > 0));
  }
}
