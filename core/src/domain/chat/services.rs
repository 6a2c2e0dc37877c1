use tracing::{error, info, instrument};

use crate::domain::{
    chat::{
        entities::{ChatMessage, ChatRole},
        ports::{ChatService, ChatTranscriptRepository},
        value_objects::{AskQuestionInput, ChatReply, MAX_QUESTION_LEN},
    },
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        ports::{AnalysisHistoryRepository, LLMClient},
        value_objects::GetAnalysisInput,
    },
    image::ports::ImageStore,
    prompt::services::build_chat_prompt,
    report::ports::ReportExporter,
};

impl<H, L, I, C, E> ChatService for Service<H, L, I, C, E>
where
    H: AnalysisHistoryRepository,
    L: LLMClient,
    I: ImageStore,
    C: ChatTranscriptRepository,
    E: ReportExporter,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id, analysis_id = %input.analysis_id))]
    async fn ask_about_food(&self, input: AskQuestionInput) -> Result<ChatReply, CoreError> {
        let question = input.question.trim().to_string();
        if question.is_empty() {
            return Err(CoreError::Invalid("question must not be empty".to_string()));
        }
        if question.chars().count() > MAX_QUESTION_LEN {
            return Err(CoreError::Invalid(format!(
                "question must be at most {} characters",
                MAX_QUESTION_LEN
            )));
        }

        let record = self
            .history_repository
            .get_by_id(&input.user_id, input.analysis_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let image_data = self.image_store.load(&record.image).await?;
        let transcript = self.chat_repository.get(record.id).await?;

        let prompt = build_chat_prompt(&question, &record.raw_response, &transcript);

        let answer = self
            .chat_llm_client
            .generate_with_image(prompt, image_data, record.image.mime_type)
            .await
            .map_err(|e| match e {
                CoreError::MissingCredential => e,
                other => {
                    error!("Chat response failed: {}", other);
                    CoreError::ExternalServiceError(format!("Chat response failed: {}", other))
                }
            })?;

        let reply = ChatMessage::new(ChatRole::Assistant, answer);
        let transcript = self
            .chat_repository
            .append(
                record.id,
                vec![ChatMessage::new(ChatRole::User, question), reply.clone()],
            )
            .await?;

        info!(turns = transcript.len(), "chat reply recorded");

        Ok(ChatReply { reply, transcript })
    }

    async fn get_chat_transcript(
        &self,
        input: GetAnalysisInput,
    ) -> Result<Vec<ChatMessage>, CoreError> {
        let record = self
            .history_repository
            .get_by_id(&input.user_id, input.analysis_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.chat_repository.get(record.id).await
    }
}
