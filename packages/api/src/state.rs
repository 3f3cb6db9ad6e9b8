use std::sync::Arc;

use shared::services::queue_registry::QueueRegistry;
use shared::services::queue_summary_service::QueueSummaryService;
use shared::services::search_registry::SearchRegistry;

#[derive(Clone)]
pub struct AppState {
    pub queue_registry: Arc<QueueRegistry>,
    pub search_registry: Arc<SearchRegistry>,
    pub queue_summary_service: Arc<QueueSummaryService>,
}
