use axum::{
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use platelens_core::domain::{
    common::value_objects::UserId,
    report::{
        entities::{ExportReportInput, ReportFormat},
        ports::ReportService,
    },
};
use uuid::Uuid;

use crate::application::http::{
    report::validators::ExportReportParams,
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    get,
    path = "/{analysis_id}/report",
    tag = "report",
    summary = "Download an analysis report",
    description = "Renders a stored analysis as a PDF or Markdown document",
    responses(
        (
            status = 200,
            description = "The report document",
            content(
                (Vec<u8> = "application/pdf"),
                (String = "text/markdown")
            )
        ),
        (status = 404, description = "Analysis not found"),
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
        ExportReportParams
    ),
)]
pub async fn export_report(
    State(state): State<AppState>,
    Path((user_id, analysis_id)): Path<(String, Uuid)>,
    Query(params): Query<ExportReportParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;
    let format = match params.format.as_deref() {
        Some(format) => format.parse::<ReportFormat>().map_err(ApiError::from)?,
        None => ReportFormat::default(),
    };

    let report = state
        .service
        .export_report(ExportReportInput {
            user_id,
            analysis_id,
            format,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        [
            (CONTENT_TYPE, report.content_type),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name),
            ),
        ],
        report.content,
    ))
}
