use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiError, state::AppState};
use shared::models::search::SearchStatistics;
use shared::models::summary::{GameSummary, GuildStatistics};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(game_summary))
        .route("/guilds/{guild_id}/statistics", get(guild_statistics))
        .route("/statistics/searches", get(search_statistics))
}

async fn game_summary(State(state): State<AppState>) -> Json<GameSummary> {
    Json(state.queue_summary_service.game_summary().await)
}

async fn guild_statistics(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> Json<GuildStatistics> {
    Json(state.queue_summary_service.guild_statistics(&guild_id).await)
}

async fn search_statistics(
    State(state): State<AppState>,
) -> Result<Json<SearchStatistics>, ApiError> {
    let statistics = state.search_registry.statistics().await?;
    Ok(Json(statistics))
}
