//! Documentation of the reps goal-tracking API.
//!
//!
//!
//! # General Infrastructure
//! - Frontend talks JSON to this server only, never to the database directly
//! - Server forwards each request to the hosted Postgres (Supabase PostgREST)
//! - Server holds no state besides config and one store client
//! - Everything derived (earnings, completion, progress) is computed per request
//!
//!
//!
//! # Money
//!
//! **Goal**: reward practice. Each topic pays a rate per 5 reps and each subtopic
//! has a payout reached at its rep goal.
//!
//! - Subtopic earnings are pro-rated per rep: `reps_completed * goal_amount / reps_goal`
//! - Topic earnings are the sum over subtopics, rounded when shown
//! - Dashboard progress is rounded earnings over the global goal
//! - A topic's rate can be locked so it is not edited by accident
//!
//!
//!
//! # Endpoints
//!
//! | method | path                                 | result                             |
//! |--------|--------------------------------------|------------------------------------|
//! | GET    | `/health`                            | `{status, timestamp}`              |
//! | GET    | `/api/dashboard`                     | goal, earnings, progress, topics   |
//! | PUT    | `/api/dashboard/global-goal`         | `{message, goal}`                  |
//! | GET    | `/api/topics`                        | every topic with subtopics         |
//! | POST   | `/api/topics`                        | created topic, 201                 |
//! | GET    | `/api/topics/{topicId}`              | topic with subtopics               |
//! | PUT    | `/api/topics/{topicId}`              | updated topic                      |
//! | POST   | `/api/topics/{topicId}/sub-topics`   | `{message, subTopic}`, 201         |
//! | GET    | `/api/sub-topics/{subTopicId}`       | subtopic                           |
//! | PUT    | `/api/sub-topics/{subTopicId}`       | `{message, subTopic}`              |
//! | POST   | `/api/sub-topics/{subTopicId}/reps`  | `{message, updatedSubtopic, updatedTopic}` |
//! | GET    | `/api/categories`                    | distinct categories, sorted        |
//!
//! Errors are `{message}` with 400 for bad input, 404 for unknown ids, 409 when a rep write
//! loses a race with another write and 500 otherwise.
//!
//!
//!
//! # Setup
//!
//! Environment, `.env` is read if present.
//! ```sh
//! PORT=3001
//! STORE=supabase            # or memory
//! SUPABASE_URL=https://<project>.supabase.co
//! SUPABASE_ANON_KEY=...     # or /run/secrets/SUPABASE_ANON_KEY
//! RUST_LOG=info,server=debug
//! ```
//!
//! Run locally without a project.
//! ```sh
//! STORE=memory RUST_LOG=info cargo run -p reps
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post, put},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    categories_handler, create_subtopic_handler, create_topic_handler, dashboard_handler, get_subtopic_handler,
    get_topic_handler, global_goal_handler, health_handler, list_topics_handler, log_reps_handler,
    update_subtopic_handler, update_topic_handler,
};
use state::State;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");

    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");
    log_endpoints();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/dashboard/global-goal", put(global_goal_handler))
        .route("/topics", get(list_topics_handler).post(create_topic_handler))
        .route("/topics/{topic_id}", get(get_topic_handler).put(update_topic_handler))
        .route("/topics/{topic_id}/sub-topics", post(create_subtopic_handler))
        .route(
            "/sub-topics/{sub_topic_id}",
            get(get_subtopic_handler).put(update_subtopic_handler),
        )
        .route("/sub-topics/{sub_topic_id}/reps", post(log_reps_handler))
        .route("/categories", get(categories_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn log_endpoints() {
    for endpoint in [
        "GET  /health",
        "GET  /api/dashboard",
        "PUT  /api/dashboard/global-goal",
        "GET  /api/topics",
        "POST /api/topics",
        "GET  /api/topics/{topicId}",
        "PUT  /api/topics/{topicId}",
        "POST /api/topics/{topicId}/sub-topics",
        "GET  /api/sub-topics/{subTopicId}",
        "PUT  /api/sub-topics/{subTopicId}",
        "POST /api/sub-topics/{subTopicId}/reps",
        "GET  /api/categories",
    ] {
        info!("  {endpoint}");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
