pub mod chat;
pub mod food_analysis;
pub mod image;
pub mod llm;
pub mod report;
