pub mod errors;
pub mod queue_registry;
pub mod queue_summary_service;
pub mod search_registry;
