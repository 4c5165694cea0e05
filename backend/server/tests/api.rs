use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{
    config::{Config, StoreKind},
    database::MemoryStore,
    router,
    state::State,
};
use tower::ServiceExt;

fn app(global_goal: f64) -> Router {
    let config = Config {
        port: 0,
        store: StoreKind::Memory,
        supabase_url: String::new(),
        supabase_key: String::new(),
    };

    router(State::with_store(config, Arc::new(MemoryStore::new(global_goal))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, payload)
}

async fn create_topic(app: &Router, title: &str, category: &str) -> Value {
    let (status, topic) = send(
        app,
        "POST",
        "/api/topics",
        Some(json!({ "title": title, "category": category })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    topic
}

async fn create_subtopic(app: &Router, topic_id: &str, body: Value) -> Value {
    let (status, payload) = send(app, "POST", &format!("/api/topics/{topic_id}/sub-topics"), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    payload["subTopic"].clone()
}

#[tokio::test]
async fn test_health() {
    let app = app(0.0);
    let (status, payload) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
    assert!(payload["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_and_get_topic() {
    let app = app(0.0);
    let created = create_topic(&app, "Rust", "Programming").await;

    assert_eq!(created["moneyPer5Reps"], 50.0);
    assert_eq!(created["isMoneyPer5RepsLocked"], false);
    assert_eq!(created["notes"], "");
    assert_eq!(created["urls"], json!([]));
    assert_eq!(created["earnings"], 0);
    assert_eq!(created["completionPercentage"], 0);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/topics/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_unknown_topic_is_404() {
    let app = app(0.0);
    let id = uuid::Uuid::new_v4();

    let (status, payload) = send(&app, "GET", &format!("/api/topics/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "Topic not found");

    let (status, _) = send(&app, "PUT", &format!("/api/topics/{id}"), Some(json!({ "notes": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/topics/{id}/sub-topics"),
        Some(json!({ "title": "Scales" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, payload) = send(&app, "GET", &format!("/api/sub-topics/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "Sub-topic not found");
}

#[tokio::test]
async fn test_malformed_input_is_400() {
    let app = app(0.0);

    let (status, payload) = send(&app, "GET", "/api/topics/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["message"].is_string());

    let (status, _) = send(&app, "POST", "/api/topics", Some(json!({ "title": "No category" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/topics",
        Some(json!({ "title": "Rust", "category": "Programming", "colour": "red" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, payload) = send(
        &app,
        "POST",
        "/api/topics",
        Some(json!({ "title": "", "category": "Programming" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "title must not be empty");
}

#[tokio::test]
async fn test_notes_only_update_keeps_other_fields() {
    let app = app(0.0);
    let created = create_topic(&app, "Guitar", "Music").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/topics/{id}"),
        Some(json!({ "notes": "practice barre chords" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notes"], "practice barre chords");
    assert_eq!(updated["title"], created["title"]);
    assert_eq!(updated["category"], created["category"]);
    assert_eq!(updated["moneyPer5Reps"], created["moneyPer5Reps"]);
    assert_eq!(updated["isMoneyPer5RepsLocked"], created["isMoneyPer5RepsLocked"]);
}

#[tokio::test]
async fn test_locked_rate() {
    let app = app(0.0);
    let created = create_topic(&app, "Guitar", "Music").await;
    let uri = format!("/api/topics/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "isMoneyPer5RepsLocked": true }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, payload) = send(&app, "PUT", &uri, Some(json!({ "moneyPer5Reps": 80 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "moneyPer5Reps is locked");

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "moneyPer5Reps": 80, "isMoneyPer5RepsLocked": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["moneyPer5Reps"], 80.0);
}

#[tokio::test]
async fn test_subtopic_lifecycle() {
    let app = app(0.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    let topic_id = topic["id"].as_str().unwrap();

    let subtopic = create_subtopic(&app, topic_id, json!({ "title": "Ownership" })).await;
    assert_eq!(subtopic["repsGoal"], 18);
    assert_eq!(subtopic["repsCompleted"], 0);
    assert_eq!(subtopic["goalAmount"], 180.0);
    assert_eq!(subtopic["topicId"], topic_id);

    let uri = format!("/api/sub-topics/{}", subtopic["id"].as_str().unwrap());
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, subtopic);

    let (status, payload) = send(&app, "PUT", &uri, Some(json!({ "repsCompleted": 9 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "Sub-topic updated successfully");
    assert_eq!(payload["subTopic"]["repsCompleted"], 9);
    assert_eq!(payload["subTopic"]["title"], "Ownership");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "repsCompleted": 19 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, topic) = send(&app, "GET", &format!("/api/topics/{topic_id}"), None).await;
    assert_eq!(topic["earnings"], 90);
    assert_eq!(topic["completionPercentage"], 50);
    assert_eq!(topic["subtopics"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_log_reps() {
    let app = app(0.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    let topic_id = topic["id"].as_str().unwrap();
    let subtopic = create_subtopic(
        &app,
        topic_id,
        json!({ "title": "Traits", "repsGoal": 2, "goalAmount": 100 }),
    )
    .await;
    let uri = format!("/api/sub-topics/{}/reps", subtopic["id"].as_str().unwrap());

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["message"].as_str().unwrap().starts_with("Rep limit reached"));

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": 2 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Invalid reps value. Must be 1 or -1.");

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "Reps logged successfully");
    assert_eq!(payload["updatedSubtopic"]["repsCompleted"], 1);
    assert_eq!(payload["updatedTopic"]["earnings"], 50);
    assert_eq!(payload["updatedTopic"]["completionPercentage"], 50);

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "reps": 1 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["message"].as_str().unwrap().starts_with("Rep limit reached"));

    let (_, subtopic) = send(&app, "GET", &format!("/api/sub-topics/{}", subtopic["id"].as_str().unwrap()), None).await;
    assert_eq!(subtopic["repsCompleted"], 2);

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "reps": "1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard() {
    let app = app(1000.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    let topic_id = topic["id"].as_str().unwrap();
    create_subtopic(
        &app,
        topic_id,
        json!({ "title": "A", "repsGoal": 18, "repsCompleted": 9, "goalAmount": 100 }),
    )
    .await;
    create_subtopic(
        &app,
        topic_id,
        json!({ "title": "B", "repsGoal": 10, "goalAmount": 50 }),
    )
    .await;

    let (status, dashboard) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["globalGoal"], 1000.0);
    assert_eq!(dashboard["currentEarnings"], 50);
    assert_eq!(dashboard["progress"], 5);

    let summary = &dashboard["topics"][0];
    assert_eq!(summary["completionPercentage"], 32);
    assert_eq!(summary["earnings"], 50);
    assert!(summary.get("subtopics").is_none());
}

#[tokio::test]
async fn test_global_goal() {
    let app = app(0.0);

    let (status, payload) = send(&app, "PUT", "/api/dashboard/global-goal", Some(json!({ "goal": 2500 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "Global goal updated successfully");
    assert_eq!(payload["goal"], 2500.0);

    let (_, dashboard) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(dashboard["globalGoal"], 2500.0);

    let (status, payload) = send(&app, "PUT", "/api/dashboard/global-goal", Some(json!({ "goal": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Invalid goal amount");

    let (status, _) = send(&app, "PUT", "/api/dashboard/global-goal", Some(json!({ "goal": "lots" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_progress_zero_without_goal() {
    let app = app(0.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    create_subtopic(
        &app,
        topic["id"].as_str().unwrap(),
        json!({ "title": "A", "repsGoal": 1, "repsCompleted": 1, "goalAmount": 100 }),
    )
    .await;

    let (_, dashboard) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(dashboard["currentEarnings"], 100);
    assert_eq!(dashboard["progress"], 0);
}

#[tokio::test]
async fn test_topics_and_categories() {
    let app = app(0.0);
    create_topic(&app, "Guitar", "Music").await;
    create_topic(&app, "Rust", "Programming").await;
    create_topic(&app, "Piano", "Music").await;

    let (status, topics) = send(&app, "GET", "/api/topics", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = topics
        .as_array()
        .unwrap()
        .iter()
        .map(|topic| topic["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Guitar", "Rust", "Piano"]);

    let (status, categories) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories, json!(["Music", "Programming"]));
}

#[tokio::test]
async fn test_reps_goal_must_fit_integer_column() {
    let app = app(0.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    let topic_id = topic["id"].as_str().unwrap();

    let (status, payload) = send(
        &app,
        "POST",
        &format!("/api/topics/{topic_id}/sub-topics"),
        Some(json!({ "title": "Huge", "repsGoal": i64::MAX, "repsCompleted": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "repsGoal must be at most 2147483647");

    let subtopic = create_subtopic(&app, topic_id, json!({ "title": "Lifetimes", "repsGoal": 2147483647 })).await;
    let uri = format!("/api/sub-topics/{}", subtopic["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "repsGoal": i64::MAX }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, payload) = send(&app, "POST", &format!("{uri}/reps"), Some(json!({ "reps": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["updatedSubtopic"]["repsGoal"], 2147483647);

    let (status, topic) = send(&app, "GET", &format!("/api/topics/{topic_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(topic["completionPercentage"], 0);
}

#[tokio::test]
async fn test_log_reps_accepts_integral_numbers() {
    let app = app(0.0);
    let topic = create_topic(&app, "Rust", "Programming").await;
    let subtopic = create_subtopic(&app, topic["id"].as_str().unwrap(), json!({ "title": "Macros" })).await;
    let uri = format!("/api/sub-topics/{}/reps", subtopic["id"].as_str().unwrap());

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": 1.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["updatedSubtopic"]["repsCompleted"], 1);

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": -1.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["updatedSubtopic"]["repsCompleted"], 0);

    let (status, payload) = send(&app, "POST", &uri, Some(json!({ "reps": 0.5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Invalid reps value. Must be 1 or -1.");
}
