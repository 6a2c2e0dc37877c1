use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::export_report::{__path_export_report, export_report};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(export_report))]
pub struct ReportApiDoc;

pub fn report_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!(
            "{}/users/{{user_id}}/analyses/{{analysis_id}}/report",
            state.args.server.root_path
        ),
        get(export_report),
    )
}
