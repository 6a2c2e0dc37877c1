use tracing::{error, info, instrument, warn};

use crate::domain::{
    chat::ports::ChatTranscriptRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        entities::AnalysisRecord,
        ports::{AnalysisHistoryRepository, FoodAnalysisService, LLMClient},
        value_objects::{
            AnalysisView, AnalyzeFoodInput, GetAnalysisHistoryInput, GetAnalysisInput,
        },
    },
    image::{entities::FoodImage, ports::ImageStore, services::intake_image},
    prompt::services::build_analysis_prompt,
    report::ports::ReportExporter,
};

impl<H, L, I, C, E> Service<H, L, I, C, E>
where
    L: LLMClient,
{
    /// Call the analysis model, retrying failed attempts after a fixed delay.
    /// A missing credential is not retried.
    async fn generate_analysis(&self, prompt: String, image: &FoodImage) -> Result<String, CoreError> {
        let max_attempts = self.retry_policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = self
                .llm_client
                .generate_with_image(prompt.clone(), image.data.clone(), image.mime_type)
                .await;

            match result {
                Ok(text) => return Ok(text),
                Err(CoreError::MissingCredential) => return Err(CoreError::MissingCredential),
                Err(e) if attempt >= max_attempts => {
                    error!(attempt, "Analysis failed: {}", e);
                    return Err(CoreError::ExternalServiceError(format!(
                        "Analysis failed: {}",
                        e
                    )));
                }
                Err(e) => {
                    warn!(attempt, max_attempts, "Analysis attempt failed, retrying: {}", e);
                    tokio::time::sleep(self.retry_policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl<H, L, I, C, E> FoodAnalysisService for Service<H, L, I, C, E>
where
    H: AnalysisHistoryRepository,
    L: LLMClient,
    I: ImageStore,
    C: ChatTranscriptRepository,
    E: ReportExporter,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<AnalysisView, CoreError> {
        // 1. Validate and normalise the photo
        let image = intake_image(input.image)?;

        // 2. Build prompt
        let custom_prompt = input
            .custom_prompt
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let prompt = build_analysis_prompt(custom_prompt.as_deref());

        // 3. Call LLM
        let raw_response = self.generate_analysis(prompt, &image).await?;

        // 4. Store the image only once the analysis succeeded
        let image_reference = self.image_store.save(&input.user_id, &image).await?;

        // 5. Append to history
        let record = AnalysisRecord::new(
            input.user_id,
            self.llm_client.model_name(),
            custom_prompt,
            raw_response,
            image_reference,
        );
        if let Err(e) = self.history_repository.append(record.clone()).await {
            // No record points at the image, so it must not outlive the failure
            if let Err(cleanup) = self.image_store.delete(&record.image).await {
                warn!(path = %record.image.path, "Failed to remove orphaned image: {}", cleanup);
            }
            return Err(e);
        }

        info!(
            analysis_id = %record.id,
            total_calories = ?record.total_calories,
            "food analysis stored"
        );

        Ok(AnalysisView::from(record))
    }

    async fn get_analysis_history(
        &self,
        input: GetAnalysisHistoryInput,
    ) -> Result<Vec<AnalysisRecord>, CoreError> {
        let records = self.history_repository.list(&input.user_id).await?;

        let offset = input.filter.offset.unwrap_or(0) as usize;
        let limit = input.filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_analysis(&self, input: GetAnalysisInput) -> Result<AnalysisView, CoreError> {
        let record = self
            .history_repository
            .get_by_id(&input.user_id, input.analysis_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        Ok(AnalysisView::from(record))
    }
}
