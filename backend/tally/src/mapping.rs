//! # Field Mapping
//!
//! The frontend speaks camelCase, the tables speak snake_case. Every stored field
//! appears exactly once in its entity's table below.
//!
//! | entity   | payload                 | storage                      |
//! |----------|-------------------------|------------------------------|
//! | topic    | `id`                    | `id`                         |
//! | topic    | `title`                 | `title`                      |
//! | topic    | `category`              | `category`                   |
//! | topic    | `notes`                 | `notes`                      |
//! | topic    | `urls`                  | `urls`                       |
//! | topic    | `moneyPer5Reps`         | `money_per_5_reps`           |
//! | topic    | `isMoneyPer5RepsLocked` | `is_money_per_5_reps_locked` |
//! | subtopic | `id`                    | `id`                         |
//! | subtopic | `topicId`               | `topic_id`                   |
//! | subtopic | `title`                 | `title`                      |
//! | subtopic | `notes`                 | `notes`                      |
//! | subtopic | `urls`                  | `urls`                       |
//! | subtopic | `repsGoal`              | `reps_goal`                  |
//! | subtopic | `repsCompleted`         | `reps_completed`             |
//! | subtopic | `goalAmount`            | `goal_amount`                |
//!
//! `earnings`, `completionPercentage` and `subtopics` are derived on read and never stored.
//! `created_at` is storage-only and drives ordering.
//!
//! The renaming itself is serde's `rename_all` on each side plus field-by-field destructuring
//! in the conversions below, so adding a column without mapping it does not compile.
//! [`TOPIC_FIELDS`] and [`SUBTOPIC_FIELDS`] are not read by serialization. Tests check them
//! against the serialized keys of both shapes, so the table above cannot drift.
use crate::{
    error::ValidationError,
    payloads::{CreateSubtopic, CreateTopic, Subtopic, Topic, TopicSummary, UpdateSubtopic, UpdateTopic},
    reps::check_bounds,
    rows::{NewSubtopicRow, NewTopicRow, SubtopicPatch, SubtopicRow, TopicPatch, TopicRow, TopicWithSubtopics},
    stats::topic_stats,
};

/// `(payload, storage)` names of every stored topic field.
pub const TOPIC_FIELDS: [(&str, &str); 7] = [
    ("id", "id"),
    ("title", "title"),
    ("category", "category"),
    ("notes", "notes"),
    ("urls", "urls"),
    ("moneyPer5Reps", "money_per_5_reps"),
    ("isMoneyPer5RepsLocked", "is_money_per_5_reps_locked"),
];

/// `(payload, storage)` names of every stored subtopic field.
pub const SUBTOPIC_FIELDS: [(&str, &str); 8] = [
    ("id", "id"),
    ("topicId", "topic_id"),
    ("title", "title"),
    ("notes", "notes"),
    ("urls", "urls"),
    ("repsGoal", "reps_goal"),
    ("repsCompleted", "reps_completed"),
    ("goalAmount", "goal_amount"),
];

pub const DEFAULT_MONEY_PER_5_REPS: f64 = 50.0;
pub const DEFAULT_REPS_GOAL: i64 = 18;

impl From<SubtopicRow> for Subtopic {
    fn from(row: SubtopicRow) -> Self {
        let SubtopicRow {
            id,
            topic_id,
            title,
            notes,
            urls,
            reps_goal,
            reps_completed,
            goal_amount,
            created_at: _,
        } = row;

        Subtopic {
            id,
            topic_id,
            title,
            reps_completed,
            reps_goal,
            notes: notes.unwrap_or_default(),
            urls: urls.unwrap_or_default(),
            goal_amount,
        }
    }
}

impl From<TopicWithSubtopics> for Topic {
    fn from(joined: TopicWithSubtopics) -> Self {
        let stats = topic_stats(&joined.subtopics);

        let TopicRow {
            id,
            title,
            category,
            notes,
            urls,
            money_per_5_reps,
            is_money_per_5_reps_locked,
            created_at: _,
        } = joined.topic;

        Topic {
            id,
            title,
            category,
            earnings: stats.rounded_earnings(),
            completion_percentage: stats.completion_percentage,
            notes: notes.unwrap_or_default(),
            urls: urls.unwrap_or_default(),
            money_per_5_reps,
            is_money_per_5_reps_locked,
            subtopics: joined.subtopics.into_iter().map(Subtopic::from).collect(),
        }
    }
}

impl From<&TopicWithSubtopics> for TopicSummary {
    fn from(joined: &TopicWithSubtopics) -> Self {
        let stats = topic_stats(&joined.subtopics);

        TopicSummary {
            id: joined.topic.id,
            title: joined.topic.title.clone(),
            category: joined.topic.category.clone(),
            earnings: stats.rounded_earnings(),
            completion_percentage: stats.completion_percentage,
        }
    }
}

impl CreateTopic {
    pub fn into_row(self) -> Result<NewTopicRow, ValidationError> {
        let CreateTopic {
            title,
            category,
            notes,
            urls,
            money_per_5_reps,
            is_money_per_5_reps_locked,
        } = self;

        let money_per_5_reps = money_per_5_reps.unwrap_or(DEFAULT_MONEY_PER_5_REPS);

        Ok(NewTopicRow {
            title: not_blank("title", title)?,
            category: not_blank("category", category)?,
            notes: notes.unwrap_or_default(),
            urls: urls.unwrap_or_default(),
            money_per_5_reps: non_negative("moneyPer5Reps", money_per_5_reps)?,
            is_money_per_5_reps_locked: is_money_per_5_reps_locked.unwrap_or(false),
        })
    }
}

impl UpdateTopic {
    pub fn into_patch(self) -> Result<TopicPatch, ValidationError> {
        let UpdateTopic {
            title,
            category,
            notes,
            urls,
            money_per_5_reps,
            is_money_per_5_reps_locked,
        } = self;

        Ok(TopicPatch {
            title: title.map(|t| not_blank("title", t)).transpose()?,
            category: category.map(|c| not_blank("category", c)).transpose()?,
            notes,
            urls,
            money_per_5_reps: money_per_5_reps
                .map(|rate| non_negative("moneyPer5Reps", rate))
                .transpose()?,
            is_money_per_5_reps_locked,
        })
    }
}

/// A locked rate only changes when the same update unlocks it.
pub fn check_rate_lock(patch: &TopicPatch, current: &TopicRow) -> Result<(), ValidationError> {
    let Some(rate) = patch.money_per_5_reps else {
        return Ok(());
    };

    let unlocking = patch.is_money_per_5_reps_locked == Some(false);
    if current.is_money_per_5_reps_locked && !unlocking && rate != current.money_per_5_reps {
        return Err(ValidationError::RateLocked);
    }

    Ok(())
}

impl CreateSubtopic {
    /// Builds the row under `topic`. A missing goal amount is the topic's rate over the rep goal.
    pub fn into_row(self, topic: &TopicRow) -> Result<NewSubtopicRow, ValidationError> {
        let CreateSubtopic {
            title,
            reps_goal,
            reps_completed,
            notes,
            urls,
            goal_amount,
        } = self;

        let reps_goal = reps_goal.unwrap_or(DEFAULT_REPS_GOAL);
        let reps_completed = reps_completed.unwrap_or(0);
        check_bounds(reps_completed, reps_goal)?;

        let goal_amount = goal_amount.unwrap_or(topic.money_per_5_reps * reps_goal as f64 / 5.0);

        Ok(NewSubtopicRow {
            topic_id: topic.id,
            title: not_blank("title", title)?,
            reps_goal,
            reps_completed,
            notes: notes.unwrap_or_default(),
            urls: urls.unwrap_or_default(),
            goal_amount: non_negative("goalAmount", goal_amount)?,
        })
    }
}

impl UpdateSubtopic {
    pub fn into_patch(self) -> Result<SubtopicPatch, ValidationError> {
        let UpdateSubtopic {
            title,
            reps_goal,
            reps_completed,
            notes,
            urls,
            goal_amount,
        } = self;

        Ok(SubtopicPatch {
            title: title.map(|t| not_blank("title", t)).transpose()?,
            reps_goal,
            reps_completed,
            notes,
            urls,
            goal_amount: goal_amount
                .map(|amount| non_negative("goalAmount", amount))
                .transpose()?,
        })
    }
}

/// Checks the rep invariant on `current` as it would look after `patch`.
pub fn check_subtopic_patch(patch: &SubtopicPatch, current: &SubtopicRow) -> Result<(), ValidationError> {
    let mut merged = current.clone();
    patch.apply(&mut merged);

    check_bounds(merged.reps_completed, merged.reps_goal)
}

fn not_blank(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }

    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::Negative { field });
    }

    Ok(value)
}
