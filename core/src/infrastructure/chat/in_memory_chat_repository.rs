use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    chat::{entities::ChatMessage, ports::ChatTranscriptRepository},
    common::entities::app_errors::CoreError,
};

/// Session-scoped transcripts. Lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatTranscriptRepository {
    transcripts: Arc<RwLock<HashMap<Uuid, Vec<ChatMessage>>>>,
}

impl ChatTranscriptRepository for InMemoryChatTranscriptRepository {
    async fn get(&self, analysis_id: Uuid) -> Result<Vec<ChatMessage>, CoreError> {
        let transcripts = self.transcripts.read().await;
        Ok(transcripts.get(&analysis_id).cloned().unwrap_or_default())
    }

    async fn append(
        &self,
        analysis_id: Uuid,
        messages: Vec<ChatMessage>,
    ) -> Result<Vec<ChatMessage>, CoreError> {
        let mut transcripts = self.transcripts.write().await;
        let transcript = transcripts.entry(analysis_id).or_default();
        transcript.extend(messages);
        Ok(transcript.clone())
    }
}
