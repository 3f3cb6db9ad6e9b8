#[derive(Debug)]
pub enum SearchRepositoryError {
    NotFound,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for SearchRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchRepositoryError::NotFound => write!(f, "QueueSearch not found"),
            SearchRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            SearchRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for SearchRepositoryError {}
