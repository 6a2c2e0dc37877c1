use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{AnalysisRecord, RenderedReport},
    report::entities::{ExportReportInput, ExportedReport},
};

/// Port for turning an analysis into a printable document
#[cfg_attr(test, mockall::automock)]
pub trait ReportExporter: Send + Sync {
    fn export(
        &self,
        record: &AnalysisRecord,
        report: &RenderedReport,
    ) -> Result<Vec<u8>, CoreError>;
}

pub trait ReportService: Send + Sync {
    fn export_report(
        &self,
        input: ExportReportInput,
    ) -> impl Future<Output = Result<ExportedReport, CoreError>> + Send;
}
