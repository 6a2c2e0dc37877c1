use axum::extract::{Path, State};
use platelens_core::domain::{
    common::value_objects::UserId,
    food_analysis::{
        ports::FoodAnalysisService,
        value_objects::{AnalysisView, GetAnalysisInput},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetAnalysisResponse {
    pub data: AnalysisView,
}

#[utoipa::path(
    get,
    path = "/{analysis_id}",
    tag = "food-analysis",
    summary = "Get one analysis",
    description = "Returns a stored analysis together with its sectioned rendering",
    responses(
        (status = 200, body = GetAnalysisResponse),
        (status = 404, description = "Analysis not found"),
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Path((user_id, analysis_id)): Path<(String, Uuid)>,
) -> Result<Response<GetAnalysisResponse>, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;

    let view = state
        .service
        .get_analysis(GetAnalysisInput {
            user_id,
            analysis_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetAnalysisResponse { data: view }))
}
