//! PostgREST client for the Supabase project.
//!
//! Single-row reads and writes ask for `application/vnd.pgrst.object+json`. PostgREST
//! answers those with `PGRST116` when zero rows match, which becomes [`StoreError::NotFound`].
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, header::ACCEPT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};
use uuid::Uuid;

use tally::rows::{
    CategoryRow, GLOBAL_GOAL_SETTING, GlobalGoalPatch, GlobalGoalRow, NewSubtopicRow, NewTopicRow,
    SETTINGS_TABLE, SUBTOPICS_TABLE, SubtopicPatch, SubtopicRow, TOPICS_TABLE, TopicPatch, TopicRow,
    TopicWithSubtopics,
};

use super::{Store, StoreError};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const NOT_FOUND_CODE: &str = "PGRST116";
const PREFER_RETURN: (&str, &str) = ("Prefer", "return=representation");
const WITH_SUBTOPICS: &str = "*,subtopics(*)";

pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    key: String,
}

#[derive(Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str) -> Result<Self, StoreError> {
        let client = Client::builder().build()?;
        let rest_url = format!("{}/rest/v1", url.trim_end_matches('/'));

        info!("Supabase REST endpoint: {rest_url}");

        Ok(Self {
            client,
            rest_url,
            key: key.to_string(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    fn single(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table).header(ACCEPT, SINGLE_OBJECT)
    }

    async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .single(Method::POST, table)
            .header(PREFER_RETURN.0, PREFER_RETURN.1)
            .json(row)
            .send()
            .await?;

        decode(response).await
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn global_goal(&self) -> Result<f64, StoreError> {
        let setting = eq(GLOBAL_GOAL_SETTING);
        let response = self
            .single(Method::GET, SETTINGS_TABLE)
            .query(&[("select", "setting_value"), ("setting_name", setting.as_str())])
            .send()
            .await?;

        match decode::<GlobalGoalRow>(response).await {
            Ok(row) => Ok(row.setting_value),
            Err(StoreError::NotFound) => Err(StoreError::MissingSetting(GLOBAL_GOAL_SETTING)),
            Err(e) => Err(e),
        }
    }

    async fn set_global_goal(&self, goal: f64) -> Result<(), StoreError> {
        let setting = eq(GLOBAL_GOAL_SETTING);
        let response = self
            .request(Method::PATCH, SETTINGS_TABLE)
            .header(PREFER_RETURN.0, PREFER_RETURN.1)
            .query(&[("setting_name", setting.as_str())])
            .json(&GlobalGoalPatch { setting_value: goal })
            .send()
            .await?;

        let updated: Vec<serde_json::Value> = decode(response).await?;
        if updated.is_empty() {
            return Err(StoreError::MissingSetting(GLOBAL_GOAL_SETTING));
        }

        Ok(())
    }

    async fn topics(&self) -> Result<Vec<TopicWithSubtopics>, StoreError> {
        let response = self
            .request(Method::GET, TOPICS_TABLE)
            .query(&[
                ("select", WITH_SUBTOPICS),
                ("order", "created_at"),
                ("subtopics.order", "created_at"),
            ])
            .send()
            .await?;

        decode(response).await
    }

    async fn topic(&self, id: Uuid) -> Result<TopicWithSubtopics, StoreError> {
        let id = eq(id);
        let response = self
            .single(Method::GET, TOPICS_TABLE)
            .query(&[
                ("select", WITH_SUBTOPICS),
                ("id", id.as_str()),
                ("subtopics.order", "created_at"),
            ])
            .send()
            .await?;

        decode(response).await
    }

    async fn insert_topic(&self, row: NewTopicRow) -> Result<TopicRow, StoreError> {
        self.insert(TOPICS_TABLE, &row).await
    }

    async fn update_topic(&self, id: Uuid, patch: TopicPatch) -> Result<TopicWithSubtopics, StoreError> {
        if patch.is_empty() {
            return self.topic(id).await;
        }

        let id = eq(id);
        let response = self
            .single(Method::PATCH, TOPICS_TABLE)
            .header(PREFER_RETURN.0, PREFER_RETURN.1)
            .query(&[
                ("select", WITH_SUBTOPICS),
                ("id", id.as_str()),
                ("subtopics.order", "created_at"),
            ])
            .json(&patch)
            .send()
            .await?;

        decode(response).await
    }

    async fn subtopic(&self, id: Uuid) -> Result<SubtopicRow, StoreError> {
        let id = eq(id);
        let response = self
            .single(Method::GET, SUBTOPICS_TABLE)
            .query(&[("select", "*"), ("id", id.as_str())])
            .send()
            .await?;

        decode(response).await
    }

    async fn insert_subtopic(&self, row: NewSubtopicRow) -> Result<SubtopicRow, StoreError> {
        self.insert(SUBTOPICS_TABLE, &row).await
    }

    async fn update_subtopic(&self, id: Uuid, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError> {
        if patch.is_empty() {
            return self.subtopic(id).await;
        }

        let id = eq(id);
        let response = self
            .single(Method::PATCH, SUBTOPICS_TABLE)
            .header(PREFER_RETURN.0, PREFER_RETURN.1)
            .query(&[("select", "*"), ("id", id.as_str())])
            .json(&patch)
            .send()
            .await?;

        decode(response).await
    }

    async fn update_subtopic_from(&self, seen: &SubtopicRow, patch: SubtopicPatch) -> Result<SubtopicRow, StoreError> {
        let response = self
            .single(Method::PATCH, SUBTOPICS_TABLE)
            .header(PREFER_RETURN.0, PREFER_RETURN.1)
            .query(&[("select", "*")])
            .query(&rep_filters(seen))
            .json(&patch)
            .send()
            .await?;

        // the row was there when read, so zero matches means the counts moved
        decode(response).await.map_err(|e| match e {
            StoreError::NotFound => StoreError::Conflict,
            other => other,
        })
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .request(Method::GET, TOPICS_TABLE)
            .query(&[("select", "category"), ("order", "category")])
            .send()
            .await?;

        let rows: Vec<CategoryRow> = decode(response).await?;

        Ok(rows.into_iter().map(|row| row.category).collect())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn rep_filters(seen: &SubtopicRow) -> [(&'static str, String); 3] {
    [
        ("id", eq(seen.id)),
        ("reps_completed", eq(seen.reps_completed)),
        ("reps_goal", eq(seen.reps_goal)),
    ]
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await?;
    debug!("PostgREST {status}: {body}");

    Err(rejection(status.as_u16(), &body))
}

fn rejection(status: u16, body: &str) -> StoreError {
    let (code, message) = match serde_json::from_str::<PostgrestError>(body) {
        Ok(error) => (error.code.unwrap_or_default(), error.message.unwrap_or_default()),
        Err(_) => (String::new(), body.to_string()),
    };

    if code == NOT_FOUND_CODE {
        return StoreError::NotFound;
    }

    StoreError::Rejected { status, code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_code() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;

        assert!(matches!(rejection(406, body), StoreError::NotFound));
    }

    #[test]
    fn test_other_rejection() {
        let body = r#"{"code":"23502","message":"null value in column \"title\""}"#;

        match rejection(400, body) {
            StoreError::Rejected { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, "23502");
                assert!(message.contains("title"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_json_rejection() {
        match rejection(502, "Bad Gateway") {
            StoreError::Rejected { code, message, .. } => {
                assert!(code.is_empty());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rest_url() {
        let store = SupabaseStore::new("https://project.supabase.co/", "key").unwrap();

        assert_eq!(store.rest_url, "https://project.supabase.co/rest/v1");
        assert_eq!(eq(Uuid::nil()), "eq.00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_rep_filters_pin_read_counts() {
        let seen = SubtopicRow {
            id: Uuid::nil(),
            topic_id: Uuid::nil(),
            title: "Scales".to_string(),
            notes: None,
            urls: None,
            reps_goal: 18,
            reps_completed: 7,
            goal_amount: 90.0,
            created_at: None,
        };

        assert_eq!(
            rep_filters(&seen),
            [
                ("id", "eq.00000000-0000-0000-0000-000000000000".to_string()),
                ("reps_completed", "eq.7".to_string()),
                ("reps_goal", "eq.18".to_string()),
            ]
        );
    }
}
