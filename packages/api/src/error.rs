use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::queue::requests::ErrorResponse;
use shared::services::errors::{
    queue_registry_errors::QueueRegistryError, search_registry_errors::SearchRegistryError,
};

#[derive(Debug)]
pub enum ApiError {
    QueueRegistry(QueueRegistryError),
    SearchRegistry(SearchRegistryError),
}

impl From<QueueRegistryError> for ApiError {
    fn from(error: QueueRegistryError) -> Self {
        ApiError::QueueRegistry(error)
    }
}

impl From<SearchRegistryError> for ApiError {
    fn from(error: SearchRegistryError) -> Self {
        ApiError::SearchRegistry(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::QueueRegistry(error) => {
                let status = match error {
                    QueueRegistryError::NotFound => StatusCode::NOT_FOUND,
                    QueueRegistryError::DuplicateId
                    | QueueRegistryError::QueueFull
                    | QueueRegistryError::AlreadyJoined => StatusCode::CONFLICT,
                    QueueRegistryError::ValidationError(_) => StatusCode::BAD_REQUEST,
                    QueueRegistryError::InvariantViolation(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, error.to_string())
            }
            ApiError::SearchRegistry(error) => {
                let status = match error {
                    SearchRegistryError::NotFound => StatusCode::NOT_FOUND,
                    SearchRegistryError::AlreadySearching => StatusCode::CONFLICT,
                    SearchRegistryError::ValidationError(_) => StatusCode::BAD_REQUEST,
                    SearchRegistryError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, error.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
