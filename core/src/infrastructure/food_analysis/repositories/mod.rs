pub mod json_history_repository;

pub use json_history_repository::JsonFileHistoryRepository;
