pub mod queue_registry_errors;
pub mod search_registry_errors;
