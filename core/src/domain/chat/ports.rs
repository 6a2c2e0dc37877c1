use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    chat::{
        entities::ChatMessage,
        value_objects::{AskQuestionInput, ChatReply},
    },
    common::entities::app_errors::CoreError,
    food_analysis::value_objects::GetAnalysisInput,
};

/// Conversation transcripts, scoped to one analysis
#[cfg_attr(test, mockall::automock)]
pub trait ChatTranscriptRepository: Send + Sync {
    fn get(
        &self,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;

    /// Append messages and return the full transcript
    fn append(
        &self,
        analysis_id: Uuid,
        messages: Vec<ChatMessage>,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;
}

pub trait ChatService: Send + Sync {
    fn ask_about_food(
        &self,
        input: AskQuestionInput,
    ) -> impl Future<Output = Result<ChatReply, CoreError>> + Send;

    fn get_chat_transcript(
        &self,
        input: GetAnalysisInput,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;
}
