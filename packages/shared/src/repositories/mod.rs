pub mod errors;
pub mod search_repository;
