use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{chat::entities::ChatMessage, common::value_objects::UserId};

pub const MAX_QUESTION_LEN: usize = 2000;

#[derive(Debug, Clone)]
pub struct AskQuestionInput {
    pub user_id: UserId,
    pub analysis_id: Uuid,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub reply: ChatMessage,
    pub transcript: Vec<ChatMessage>,
}
