//! # Client Payloads
//!
//! Requests and responses exchanged with the frontend, all camelCase JSON.
//!
//! Request types reject unknown fields, so a misspelt `repsGoal` is a 400 and not a silent no-op.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub earnings: i64,
    pub completion_percentage: i64,
    pub notes: String,
    pub urls: Vec<String>,
    pub money_per_5_reps: f64,
    pub is_money_per_5_reps_locked: bool,
    pub subtopics: Vec<Subtopic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtopic {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub title: String,
    pub reps_completed: i64,
    pub reps_goal: i64,
    pub notes: String,
    pub urls: Vec<String>,
    pub goal_amount: f64,
}

/// Topic reduced to the fields the dashboard lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub earnings: i64,
    pub completion_percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub global_goal: f64,
    pub current_earnings: i64,
    pub progress: i64,
    pub topics: Vec<TopicSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTopic {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub money_per_5_reps: Option<f64>,
    #[serde(default)]
    pub is_money_per_5_reps_locked: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTopic {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub money_per_5_reps: Option<f64>,
    #[serde(default)]
    pub is_money_per_5_reps_locked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSubtopic {
    pub title: String,
    #[serde(default)]
    pub reps_goal: Option<i64>,
    #[serde(default)]
    pub reps_completed: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub goal_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSubtopic {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub reps_goal: Option<i64>,
    #[serde(default)]
    pub reps_completed: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub goal_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogReps {
    pub reps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetGlobalGoal {
    pub goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalGoalUpdated {
    pub message: String,
    pub goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicSaved {
    pub message: String,
    pub sub_topic: Subtopic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepsLogged {
    pub message: String,
    pub updated_subtopic: Subtopic,
    pub updated_topic: Topic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}
