use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use shared::repositories::search_repository::DynamoDbSearchRepository;
use shared::services::queue_registry::QueueRegistry;
use shared::services::queue_summary_service::QueueSummaryService;
use shared::services::search_registry::SearchRegistry;

fn app(state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::queues::routes())
        .merge(routes::search::routes())
        .merge(routes::summary::routes())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // Set up registries. Queues are ephemeral; searches are mirrored to
    // DynamoDB. The registries must outlive every request and their timers,
    // so this binary is a long-running process, not a per-request runtime.
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let search_repository = Arc::new(DynamoDbSearchRepository::new(client));

    let queue_registry = Arc::new(QueueRegistry::new());
    let search_registry = Arc::new(SearchRegistry::new(search_repository));
    let queue_summary_service = Arc::new(QueueSummaryService::new((*queue_registry).clone()));

    let app_state = state::AppState {
        queue_registry,
        search_registry,
        queue_summary_service,
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Listening on port {}", port);

    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
