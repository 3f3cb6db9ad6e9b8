pub mod health;
pub mod queues;
pub mod search;
pub mod summary;
