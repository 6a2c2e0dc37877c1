pub mod ask_about_food;
pub mod get_chat_transcript;
