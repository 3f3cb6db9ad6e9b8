use crate::repositories::errors::search_repository_errors::SearchRepositoryError;

#[derive(Debug)]
pub enum SearchRegistryError {
    AlreadySearching,
    NotFound,
    ValidationError(String),
    RepositoryError(SearchRepositoryError),
}

impl std::fmt::Display for SearchRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchRegistryError::AlreadySearching => {
                write!(f, "User already has an active search")
            }
            SearchRegistryError::NotFound => write!(f, "No active search for user"),
            SearchRegistryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            SearchRegistryError::RepositoryError(err) => {
                write!(f, "Repository error: {}", err)
            }
        }
    }
}

impl std::error::Error for SearchRegistryError {}

impl From<SearchRepositoryError> for SearchRegistryError {
    fn from(err: SearchRepositoryError) -> Self {
        SearchRegistryError::RepositoryError(err)
    }
}
