pub mod chat;
pub mod common;
pub mod food_analysis;
pub mod image;
pub mod prompt;
pub mod report;
