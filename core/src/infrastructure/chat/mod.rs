pub mod in_memory_chat_repository;

pub use in_memory_chat_repository::InMemoryChatTranscriptRepository;
