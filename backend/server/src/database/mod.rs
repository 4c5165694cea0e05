//! # Store
//!
//! Every read and write goes to the hosted Postgres behind Supabase. The server keeps no copy.
//!
//! ## Requirements
//!
//! - Row-level CRUD on `topics`, `subtopics` and `global_settings`
//! - Topics read together with their subtopics in one round trip
//! - A single-row read that tells "no such row" apart from every other failure
//!
//! ## Implementations
//!
//! - [`SupabaseStore`]: PostgREST over HTTPS, the production store
//! - [`MemoryStore`]: in-process tables for tests and local runs without a project
//!
//! Write ordering and isolation are whatever the store gives per call, except that rep
//! writes only land while the row still holds the counts they were checked against.
//! No retries, a failed call surfaces to the request that made it.
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use tally::rows::{
    NewSubtopicRow, NewTopicRow, SubtopicPatch, SubtopicRow, TopicPatch, TopicRow, TopicWithSubtopics,
};

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Row not found")]
    NotFound,

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store rejected request ({status}): {code} {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Setting {0} is missing")]
    MissingSetting(&'static str),

    #[error("Row changed since it was read")]
    Conflict,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn global_goal(&self) -> Result<f64, StoreError>;

    async fn set_global_goal(&self, goal: f64) -> Result<(), StoreError>;

    /// All topics with their subtopics, oldest topic first.
    async fn topics(&self) -> Result<Vec<TopicWithSubtopics>, StoreError>;

    async fn topic(&self, id: Uuid) -> Result<TopicWithSubtopics, StoreError>;

    async fn insert_topic(&self, row: NewTopicRow) -> Result<TopicRow, StoreError>;

    async fn update_topic(&self, id: Uuid, patch: TopicPatch) -> Result<TopicWithSubtopics, StoreError>;

    async fn subtopic(&self, id: Uuid) -> Result<SubtopicRow, StoreError>;

    async fn insert_subtopic(&self, row: NewSubtopicRow) -> Result<SubtopicRow, StoreError>;

    async fn update_subtopic(&self, id: Uuid, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError>;

    /// Applies `patch` only while the row still has the rep counts of `seen`.
    /// Returns [`StoreError::Conflict`] when another write moved them first.
    async fn update_subtopic_from(&self, seen: &SubtopicRow, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError>;

    /// Category of every topic, sorted, duplicates included.
    async fn categories(&self) -> Result<Vec<String>, StoreError>;

    fn name(&self) -> &'static str;
}
