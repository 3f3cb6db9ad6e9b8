pub mod queue;
pub mod search;
pub mod summary;
