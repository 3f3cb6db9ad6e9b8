pub mod search_repository_errors;
