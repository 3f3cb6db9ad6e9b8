use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::{error::ApiError, state::AppState};
use shared::models::search::{requests::StartSearchRequest, QueueSearch};
use shared::services::errors::search_registry_errors::SearchRegistryError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/searches", post(start_search))
        .route("/searches/{user_id}", get(get_search))
        .route("/searches/{user_id}", delete(cancel_search))
}

async fn start_search(
    State(state): State<AppState>,
    Json(payload): Json<StartSearchRequest>,
) -> Result<(StatusCode, Json<QueueSearch>), ApiError> {
    let search = state
        .search_registry
        .start_search(
            &payload.user_id,
            &payload.guild_id,
            &payload.game_name,
            payload.game_mode.as_deref(),
            payload.search_time,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(search)))
}

async fn get_search(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<QueueSearch>, ApiError> {
    state
        .search_registry
        .get_active(&user_id)
        .await
        .map(Json)
        .ok_or(ApiError::SearchRegistry(SearchRegistryError::NotFound))
}

async fn cancel_search(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<QueueSearch>, ApiError> {
    let search = state.search_registry.cancel_search(&user_id).await?;
    Ok(Json(search))
}
