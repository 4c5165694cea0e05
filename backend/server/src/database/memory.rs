//! In-process tables with the same contract as the hosted store.
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tally::rows::{
    NewSubtopicRow, NewTopicRow, SubtopicPatch, SubtopicRow, TopicPatch, TopicRow, TopicWithSubtopics,
};

use super::{Store, StoreError};

#[derive(Default)]
struct Tables {
    global_goal: f64,
    topics: Vec<TopicRow>,
    subtopics: Vec<SubtopicRow>,
}

impl Tables {
    fn joined(&self, topic: &TopicRow) -> TopicWithSubtopics {
        TopicWithSubtopics {
            topic: topic.clone(),
            subtopics: self
                .subtopics
                .iter()
                .filter(|subtopic| subtopic.topic_id == topic.id)
                .cloned()
                .collect(),
        }
    }
}

/// Rows are kept in insertion order, which is also `created_at` order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new(global_goal: f64) -> Self {
        Self {
            tables: RwLock::new(Tables {
                global_goal,
                ..Tables::default()
            }),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn global_goal(&self) -> Result<f64, StoreError> {
        Ok(self.tables.read().await.global_goal)
    }

    async fn set_global_goal(&self, goal: f64) -> Result<(), StoreError> {
        self.tables.write().await.global_goal = goal;

        Ok(())
    }

    async fn topics(&self) -> Result<Vec<TopicWithSubtopics>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables.topics.iter().map(|topic| tables.joined(topic)).collect())
    }

    async fn topic(&self, id: Uuid) -> Result<TopicWithSubtopics, StoreError> {
        let tables = self.tables.read().await;

        tables
            .topics
            .iter()
            .find(|topic| topic.id == id)
            .map(|topic| tables.joined(topic))
            .ok_or(StoreError::NotFound)
    }

    async fn insert_topic(&self, row: NewTopicRow) -> Result<TopicRow, StoreError> {
        let NewTopicRow {
            title,
            category,
            notes,
            urls,
            money_per_5_reps,
            is_money_per_5_reps_locked,
        } = row;

        let topic = TopicRow {
            id: Uuid::new_v4(),
            title,
            category,
            notes: Some(notes),
            urls: Some(urls),
            money_per_5_reps,
            is_money_per_5_reps_locked,
            created_at: Some(Utc::now()),
        };

        self.tables.write().await.topics.push(topic.clone());

        Ok(topic)
    }

    async fn update_topic(&self, id: Uuid, patch: TopicPatch) -> Result<TopicWithSubtopics, StoreError> {
        let mut tables = self.tables.write().await;

        let topic = tables
            .topics
            .iter_mut()
            .find(|topic| topic.id == id)
            .ok_or(StoreError::NotFound)?;
        patch.apply(topic);
        let topic = topic.clone();

        Ok(tables.joined(&topic))
    }

    async fn subtopic(&self, id: Uuid) -> Result<SubtopicRow, StoreError> {
        self.tables
            .read()
            .await
            .subtopics
            .iter()
            .find(|subtopic| subtopic.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_subtopic(&self, row: NewSubtopicRow) -> Result<SubtopicRow, StoreError> {
        let NewSubtopicRow {
            topic_id,
            title,
            reps_goal,
            reps_completed,
            notes,
            urls,
            goal_amount,
        } = row;

        let mut tables = self.tables.write().await;

        // foreign key on topic_id
        if !tables.topics.iter().any(|topic| topic.id == topic_id) {
            return Err(StoreError::Rejected {
                status: 409,
                code: "23503".to_string(),
                message: format!("topic {topic_id} does not exist"),
            });
        }

        let subtopic = SubtopicRow {
            id: Uuid::new_v4(),
            topic_id,
            title,
            notes: Some(notes),
            urls: Some(urls),
            reps_goal,
            reps_completed,
            goal_amount,
            created_at: Some(Utc::now()),
        };
        tables.subtopics.push(subtopic.clone());

        Ok(subtopic)
    }

    async fn update_subtopic(&self, id: Uuid, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError> {
        let mut tables = self.tables.write().await;

        let subtopic = tables
            .subtopics
            .iter_mut()
            .find(|subtopic| subtopic.id == id)
            .ok_or(StoreError::NotFound)?;
        patch.apply(subtopic);

        Ok(subtopic.clone())
    }

    async fn update_subtopic_from(&self, seen: &SubtopicRow, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError> {
        let mut tables = self.tables.write().await;

        let subtopic = tables
            .subtopics
            .iter_mut()
            .find(|subtopic| subtopic.id == seen.id)
            .ok_or(StoreError::NotFound)?;
        if subtopic.reps_completed != seen.reps_completed || subtopic.reps_goal != seen.reps_goal {
            return Err(StoreError::Conflict);
        }
        patch.apply(subtopic);

        Ok(subtopic.clone())
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let mut categories: Vec<String> = self
            .tables
            .read()
            .await
            .topics
            .iter()
            .map(|topic| topic.category.clone())
            .collect();
        categories.sort();

        Ok(categories)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
