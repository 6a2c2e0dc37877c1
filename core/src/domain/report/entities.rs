use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, value_objects::UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Markdown,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "health_analysis.pdf",
            ReportFormat::Markdown => "health_analysis.md",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            other => Err(CoreError::Invalid(format!("unknown report format '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportReportInput {
    pub user_id: UserId,
    pub analysis_id: Uuid,
    pub format: ReportFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}
