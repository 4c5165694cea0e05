use std::sync::Arc;

use axum::{Json, extract::State as AxumState, http::StatusCode};
use tally::{
    ValidationError,
    dashboard::summarize,
    mapping::{check_rate_lock, check_subtopic_patch},
    payloads::{
        CreateSubtopic, CreateTopic, Dashboard, GlobalGoalUpdated, Health, LogReps, RepsLogged,
        SetGlobalGoal, Subtopic, SubtopicSaved, Topic, UpdateSubtopic, UpdateTopic,
    },
    reps::{RepDelta, next_reps},
    rows::{SubtopicPatch, TopicWithSubtopics},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::AppError,
    state::State,
    utils::{Id, Payload, dedup_sorted, timestamp},
};

type Shared = AxumState<Arc<State>>;
type ApiResult<T> = Result<Json<T>, AppError>;

const TOPIC: &str = "Topic";
const SUBTOPIC: &str = "Sub-topic";

pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        timestamp: timestamp(),
    })
}

pub async fn dashboard_handler(AxumState(state): Shared) -> ApiResult<Dashboard> {
    let global_goal = state.store.global_goal().await?;
    let topics = state.store.topics().await?;

    Ok(Json(summarize(global_goal, &topics)))
}

pub async fn global_goal_handler(
    AxumState(state): Shared,
    Payload(SetGlobalGoal { goal }): Payload<SetGlobalGoal>,
) -> ApiResult<GlobalGoalUpdated> {
    if !goal.is_finite() || goal < 0.0 {
        return Err(ValidationError::InvalidGlobalGoal.into());
    }

    state.store.set_global_goal(goal).await?;
    info!("Global goal set to {goal}");

    Ok(Json(GlobalGoalUpdated {
        message: "Global goal updated successfully".to_string(),
        goal,
    }))
}

pub async fn list_topics_handler(AxumState(state): Shared) -> ApiResult<Vec<Topic>> {
    let topics = state.store.topics().await?;

    Ok(Json(topics.into_iter().map(Topic::from).collect()))
}

pub async fn create_topic_handler(
    AxumState(state): Shared,
    Payload(request): Payload<CreateTopic>,
) -> Result<(StatusCode, Json<Topic>), AppError> {
    let row = request.into_row()?;
    let topic = state.store.insert_topic(row).await?;
    info!("Created topic {}", topic.id);

    let topic = Topic::from(TopicWithSubtopics {
        topic,
        subtopics: Vec::new(),
    });

    Ok((StatusCode::CREATED, Json(topic)))
}

pub async fn get_topic_handler(AxumState(state): Shared, Id(topic_id): Id<Uuid>) -> ApiResult<Topic> {
    let topic = state.store.topic(topic_id).await.map_err(AppError::missing(TOPIC))?;

    Ok(Json(Topic::from(topic)))
}

pub async fn update_topic_handler(
    AxumState(state): Shared,
    Id(topic_id): Id<Uuid>,
    Payload(request): Payload<UpdateTopic>,
) -> ApiResult<Topic> {
    let patch = request.into_patch()?;

    if patch.money_per_5_reps.is_some() {
        let current = state.store.topic(topic_id).await.map_err(AppError::missing(TOPIC))?;
        check_rate_lock(&patch, &current.topic)?;
    }

    let topic = state
        .store
        .update_topic(topic_id, patch)
        .await
        .map_err(AppError::missing(TOPIC))?;
    debug!("Updated topic {topic_id}");

    Ok(Json(Topic::from(topic)))
}

pub async fn create_subtopic_handler(
    AxumState(state): Shared,
    Id(topic_id): Id<Uuid>,
    Payload(request): Payload<CreateSubtopic>,
) -> Result<(StatusCode, Json<SubtopicSaved>), AppError> {
    let topic = state.store.topic(topic_id).await.map_err(AppError::missing(TOPIC))?;

    let row = request.into_row(&topic.topic)?;
    let subtopic = state.store.insert_subtopic(row).await?;
    info!("Created sub-topic {} under topic {topic_id}", subtopic.id);

    Ok((
        StatusCode::CREATED,
        Json(SubtopicSaved {
            message: "Sub-topic created successfully".to_string(),
            sub_topic: Subtopic::from(subtopic),
        }),
    ))
}

pub async fn get_subtopic_handler(AxumState(state): Shared, Id(subtopic_id): Id<Uuid>) -> ApiResult<Subtopic> {
    let subtopic = state
        .store
        .subtopic(subtopic_id)
        .await
        .map_err(AppError::missing(SUBTOPIC))?;

    Ok(Json(Subtopic::from(subtopic)))
}

pub async fn update_subtopic_handler(
    AxumState(state): Shared,
    Id(subtopic_id): Id<Uuid>,
    Payload(request): Payload<UpdateSubtopic>,
) -> ApiResult<SubtopicSaved> {
    let patch = request.into_patch()?;

    let subtopic = if patch.touches_reps() {
        let current = state
            .store
            .subtopic(subtopic_id)
            .await
            .map_err(AppError::missing(SUBTOPIC))?;
        check_subtopic_patch(&patch, &current)?;

        state.store.update_subtopic_from(&current, patch).await
    } else {
        state.store.update_subtopic(subtopic_id, patch).await
    }
    .map_err(AppError::missing(SUBTOPIC))?;

    Ok(Json(SubtopicSaved {
        message: "Sub-topic updated successfully".to_string(),
        sub_topic: Subtopic::from(subtopic),
    }))
}

pub async fn log_reps_handler(
    AxumState(state): Shared,
    Id(subtopic_id): Id<Uuid>,
    Payload(LogReps { reps }): Payload<LogReps>,
) -> ApiResult<RepsLogged> {
    let delta = RepDelta::try_from(reps)?;

    let subtopic = state
        .store
        .subtopic(subtopic_id)
        .await
        .map_err(AppError::missing(SUBTOPIC))?;

    let reps_completed = next_reps(subtopic.reps_completed, subtopic.reps_goal, delta)?;

    let updated = state
        .store
        .update_subtopic_from(&subtopic, SubtopicPatch::reps_completed(reps_completed))
        .await
        .map_err(AppError::missing(SUBTOPIC))?;
    let topic = state.store.topic(subtopic.topic_id).await?;
    debug!("Sub-topic {subtopic_id} at {reps_completed}/{} reps", updated.reps_goal);

    Ok(Json(RepsLogged {
        message: "Reps logged successfully".to_string(),
        updated_subtopic: Subtopic::from(updated),
        updated_topic: Topic::from(topic),
    }))
}

pub async fn categories_handler(AxumState(state): Shared) -> ApiResult<Vec<String>> {
    let categories = state.store.categories().await?;

    Ok(Json(dedup_sorted(categories)))
}
