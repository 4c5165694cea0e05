//! # Storage Rows
//!
//! Shapes of the hosted Postgres tables as PostgREST returns and accepts them.
//!
//! ## Tables
//! - `topics`: one row per topic, rate in currency units per 5 completed reps
//! - `subtopics`: one row per subtopic, owned by a topic through `topic_id`
//! - `global_settings`: key-value pairs, only `global_goal` is read
//!
//! `notes` and `urls` are nullable in storage. The payload side never sees a null,
//! see [`crate::mapping`].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const TOPICS_TABLE: &str = "topics";
pub const SUBTOPICS_TABLE: &str = "subtopics";
pub const SETTINGS_TABLE: &str = "global_settings";

pub const GLOBAL_GOAL_SETTING: &str = "global_goal";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    pub money_per_5_reps: f64,
    #[serde(default)]
    pub is_money_per_5_reps_locked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A topic row with its embedded `subtopics(*)` relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWithSubtopics {
    #[serde(flatten)]
    pub topic: TopicRow,
    #[serde(default)]
    pub subtopics: Vec<SubtopicRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtopicRow {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    pub reps_goal: i64,
    pub reps_completed: i64,
    pub goal_amount: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTopicRow {
    pub title: String,
    pub category: String,
    pub notes: String,
    pub urls: Vec<String>,
    pub money_per_5_reps: f64,
    pub is_money_per_5_reps_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubtopicRow {
    pub topic_id: Uuid,
    pub title: String,
    pub reps_goal: i64,
    pub reps_completed: i64,
    pub notes: String,
    pub urls: Vec<String>,
    pub goal_amount: f64,
}

/// Partial topic update. Only `Some` fields reach the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money_per_5_reps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_money_per_5_reps_locked: Option<bool>,
}

impl TopicPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, row: &mut TopicRow) {
        if let Some(title) = &self.title {
            row.title = title.clone();
        }
        if let Some(category) = &self.category {
            row.category = category.clone();
        }
        if let Some(notes) = &self.notes {
            row.notes = Some(notes.clone());
        }
        if let Some(urls) = &self.urls {
            row.urls = Some(urls.clone());
        }
        if let Some(rate) = self.money_per_5_reps {
            row.money_per_5_reps = rate;
        }
        if let Some(locked) = self.is_money_per_5_reps_locked {
            row.is_money_per_5_reps_locked = locked;
        }
    }
}

/// Partial subtopic update. Only `Some` fields reach the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubtopicPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_completed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_amount: Option<f64>,
}

impl SubtopicPatch {
    pub fn reps_completed(reps_completed: i64) -> Self {
        Self {
            reps_completed: Some(reps_completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn touches_reps(&self) -> bool {
        self.reps_goal.is_some() || self.reps_completed.is_some()
    }

    pub fn apply(&self, row: &mut SubtopicRow) {
        if let Some(title) = &self.title {
            row.title = title.clone();
        }
        if let Some(goal) = self.reps_goal {
            row.reps_goal = goal;
        }
        if let Some(completed) = self.reps_completed {
            row.reps_completed = completed;
        }
        if let Some(notes) = &self.notes {
            row.notes = Some(notes.clone());
        }
        if let Some(urls) = &self.urls {
            row.urls = Some(urls.clone());
        }
        if let Some(amount) = self.goal_amount {
            row.goal_amount = amount;
        }
    }
}

/// The `global_goal` row of `global_settings`.
///
/// `setting_value` has been written both as text and as a number, so either is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GlobalGoalRow {
    #[serde(deserialize_with = "number_or_text")]
    pub setting_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalGoalPatch {
    pub setting_value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRow {
    pub category: String,
}

fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_row() -> TopicRow {
        TopicRow {
            id: Uuid::nil(),
            title: "Rust".to_string(),
            category: "Programming".to_string(),
            notes: None,
            urls: None,
            money_per_5_reps: 50.0,
            is_money_per_5_reps_locked: false,
            created_at: None,
        }
    }

    #[test]
    fn test_global_goal_accepts_text_and_number() {
        let text: GlobalGoalRow = serde_json::from_str(r#"{"setting_value":"1000"}"#).unwrap();
        let number: GlobalGoalRow = serde_json::from_str(r#"{"setting_value":250.5}"#).unwrap();

        assert_eq!(text.setting_value, 1000.0);
        assert_eq!(number.setting_value, 250.5);
        assert!(serde_json::from_str::<GlobalGoalRow>(r#"{"setting_value":"lots"}"#).is_err());
    }

    #[test]
    fn test_topic_with_embedded_subtopics() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "title": "Rust",
            "category": "Programming",
            "notes": null,
            "urls": null,
            "money_per_5_reps": 50,
            "is_money_per_5_reps_locked": true,
            "created_at": "2025-01-01T00:00:00+00:00",
            "subtopics": []
        }"#;

        let topic: TopicWithSubtopics = serde_json::from_str(json).unwrap();
        assert!(topic.topic.is_money_per_5_reps_locked);
        assert!(topic.subtopics.is_empty());
        assert!(topic.topic.created_at.is_some());
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = TopicPatch {
            notes: Some("read chapter 4".to_string()),
            ..TopicPatch::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "notes": "read chapter 4" }));
    }

    #[test]
    fn test_patch_apply_leaves_other_fields() {
        let mut row = topic_row();
        TopicPatch {
            notes: Some("n".to_string()),
            ..TopicPatch::default()
        }
        .apply(&mut row);

        assert_eq!(row.title, "Rust");
        assert_eq!(row.category, "Programming");
        assert_eq!(row.money_per_5_reps, 50.0);
        assert_eq!(row.notes.as_deref(), Some("n"));
    }

    #[test]
    fn test_empty_patches() {
        assert!(TopicPatch::default().is_empty());
        assert!(SubtopicPatch::default().is_empty());
        assert!(!SubtopicPatch::reps_completed(3).is_empty());
        assert!(SubtopicPatch::reps_completed(3).touches_reps());
    }
}
