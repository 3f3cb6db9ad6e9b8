use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::search::{QueueSearch, SearchStatistics};
use crate::repositories::errors::search_repository_errors::SearchRepositoryError;

/// Key of the aggregate counters item. Real user identifiers are numeric
/// snowflakes, so this can never collide with one.
const STATISTICS_KEY: &str = "#statistics";

/// Durable mirror of the search registry. The registry treats every call as
/// best-effort: failures are logged by the caller, never acted on.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn save_search(&self, search: &QueueSearch) -> Result<(), SearchRepositoryError>;

    async fn remove_search(&self, user_id: &str) -> Result<(), SearchRepositoryError>;

    async fn get_statistics(&self) -> Result<SearchStatistics, SearchRepositoryError>;
}

pub struct DynamoDbSearchRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbSearchRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("SEARCHES_TABLE")
            .expect("SEARCHES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl SearchRepository for DynamoDbSearchRepository {
    async fn save_search(&self, search: &QueueSearch) -> Result<(), SearchRepositoryError> {
        let item =
            to_item(search).map_err(|e| SearchRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| SearchRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn remove_search(&self, user_id: &str) -> Result<(), SearchRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| SearchRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_statistics(&self) -> Result<SearchStatistics, SearchRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("user_id", AttributeValue::S(STATISTICS_KEY.to_string()))
            .send()
            .await
            .map_err(|e| SearchRepositoryError::DynamoDb(e.to_string()))?;

        match result.item {
            Some(item) => {
                from_item(item).map_err(|e| SearchRepositoryError::Serialization(e.to_string()))
            }
            // Counters item does not exist until the first search is recorded
            None => Ok(SearchStatistics::default()),
        }
    }
}
