use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};
use shared::models::queue::{
    requests::{CreateQueueRequest, JoinQueueRequest, LeaveQueuesRequest},
    LeaveReport, Queue,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/queues", post(create_queue).get(list_queues))
        .route("/queues/leave", post(leave_queues))
        .route("/queues/{queue_id}", get(get_queue))
        .route("/queues/{queue_id}/join", post(join_queue))
}

async fn create_queue(
    State(state): State<AppState>,
    Json(payload): Json<CreateQueueRequest>,
) -> Result<(StatusCode, Json<Queue>), ApiError> {
    let queue = Queue::new(
        &payload.guild_id,
        &payload.owner_id,
        &payload.game_name,
        payload.max_players,
    );

    // Respond with the snapshot taken before registration; a re-fetch could
    // race with a concurrent leave closing the queue right away.
    let snapshot = queue.clone();
    state.queue_registry.register(queue).await?;

    Ok((StatusCode::CREATED, Json(snapshot)))
}

#[derive(Deserialize)]
struct ListQueuesParams {
    guild_id: String,
}

async fn list_queues(
    State(state): State<AppState>,
    Query(params): Query<ListQueuesParams>,
) -> Json<Vec<Queue>> {
    Json(state.queue_registry.list_by_guild(&params.guild_id).await)
}

async fn get_queue(
    State(state): State<AppState>,
    Path(queue_id): Path<String>,
) -> Result<Json<Queue>, ApiError> {
    state
        .queue_registry
        .get(&queue_id)
        .await
        .map(Json)
        .ok_or(ApiError::QueueRegistry(
            shared::services::errors::queue_registry_errors::QueueRegistryError::NotFound,
        ))
}

async fn join_queue(
    State(state): State<AppState>,
    Path(queue_id): Path<String>,
    Json(payload): Json<JoinQueueRequest>,
) -> Result<Json<Queue>, ApiError> {
    let queue = state
        .queue_registry
        .join(&queue_id, &payload.user_id)
        .await?;
    Ok(Json(queue))
}

async fn leave_queues(
    State(state): State<AppState>,
    Json(payload): Json<LeaveQueuesRequest>,
) -> Json<LeaveReport> {
    Json(
        state
            .queue_registry
            .leave(&payload.guild_id, &payload.user_id)
            .await,
    )
}
