use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::value_objects::UserId,
    food_analysis::{
        entities::{AnalysisRecord, RenderedReport},
        helpers::render_response,
    },
    image::value_objects::ImageIntakeInput,
};

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    pub user_id: UserId,
    pub image: ImageIntakeInput,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetAnalysisHistoryFilter {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GetAnalysisHistoryInput {
    pub user_id: UserId,
    pub filter: GetAnalysisHistoryFilter,
}

#[derive(Debug, Clone)]
pub struct GetAnalysisInput {
    pub user_id: UserId,
    pub analysis_id: Uuid,
}

/// A stored record together with its sectioned rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisView {
    pub record: AnalysisRecord,
    pub report: RenderedReport,
}

impl From<AnalysisRecord> for AnalysisView {
    fn from(record: AnalysisRecord) -> Self {
        let report = render_response(&record.raw_response);
        Self { record, report }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}
