use std::future::Future;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::UserId},
    food_analysis::{
        entities::AnalysisRecord,
        value_objects::{AnalysisView, AnalyzeFoodInput, GetAnalysisHistoryInput, GetAnalysisInput},
    },
    image::entities::ImageMimeType,
};

/// Append-only log of analysis records, one log per user
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisHistoryRepository: Send + Sync {
    fn append(
        &self,
        record: AnalysisRecord,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// All records of the user, oldest first
    fn list(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn get_by_id(
        &self,
        user_id: &UserId,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;
}

/// LLM Client trait for calling multimodal AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn model_name(&self) -> String;

    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: ImageMimeType,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for food analysis business logic
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<AnalysisView, CoreError>> + Send;

    fn get_analysis_history(
        &self,
        input: GetAnalysisHistoryInput,
    ) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn get_analysis(
        &self,
        input: GetAnalysisInput,
    ) -> impl Future<Output = Result<AnalysisView, CoreError>> + Send;
}
