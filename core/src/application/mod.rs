use tracing::{info, warn};

use crate::{
    domain::{
        common::{PlatelensConfig, services::Service},
        food_analysis::value_objects::RetryPolicy,
    },
    infrastructure::{
        chat::InMemoryChatTranscriptRepository,
        food_analysis::repositories::JsonFileHistoryRepository, image::LocalImageStore,
        llm::GeminiLLMClient, report::PdfReportExporter,
    },
};

pub type PlatelensService = Service<
    JsonFileHistoryRepository,
    GeminiLLMClient,
    LocalImageStore,
    InMemoryChatTranscriptRepository,
    PdfReportExporter,
>;

pub async fn create_service(config: PlatelensConfig) -> Result<PlatelensService, anyhow::Error> {
    let llm = &config.llm;

    if llm
        .gemini_api_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty())
    {
        warn!("GOOGLE_API_KEY is not set, analysis requests will be rejected");
    }

    let analysis_client = GeminiLLMClient::new(
        llm.gemini_api_key.clone(),
        llm.gemini_model.clone(),
        llm.gemini_base_url.clone(),
        llm.request_timeout,
    )?;
    let chat_client = GeminiLLMClient::new(
        llm.gemini_api_key.clone(),
        llm.gemini_chat_model.clone(),
        llm.gemini_base_url.clone(),
        llm.request_timeout,
    )?;

    let history_dir = config.storage.history_dir();
    let images_dir = config.storage.images_dir();
    tokio::fs::create_dir_all(&history_dir).await?;
    tokio::fs::create_dir_all(&images_dir).await?;

    info!(
        data_dir = %config.storage.data_dir.display(),
        model = %llm.gemini_model,
        chat_model = %llm.gemini_chat_model,
        "service initialised"
    );

    Ok(Service::new(
        JsonFileHistoryRepository::new(history_dir),
        analysis_client,
        chat_client,
        LocalImageStore::new(images_dir),
        InMemoryChatTranscriptRepository::default(),
        PdfReportExporter::default(),
        RetryPolicy {
            max_attempts: llm.max_retries.max(1),
            delay: llm.retry_delay,
        },
    ))
}
