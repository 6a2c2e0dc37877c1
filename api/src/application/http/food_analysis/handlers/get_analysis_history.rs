use axum::extract::{Path, Query, State};
use platelens_core::domain::{
    common::value_objects::UserId,
    food_analysis::{
        entities::AnalysisRecord,
        ports::FoodAnalysisService,
        value_objects::{GetAnalysisHistoryFilter, GetAnalysisHistoryInput},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::GetAnalysisHistoryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetAnalysisHistoryResponse {
    pub data: Vec<AnalysisRecord>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "food-analysis",
    summary = "Get analysis history",
    description = "Returns the user's analyses, oldest first",
    responses(
        (status = 200, body = GetAnalysisHistoryResponse)
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
        GetAnalysisHistoryParams
    ),
)]
pub async fn get_analysis_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<GetAnalysisHistoryParams>,
) -> Result<Response<GetAnalysisHistoryResponse>, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;

    let records = state
        .service
        .get_analysis_history(GetAnalysisHistoryInput {
            user_id,
            filter: GetAnalysisHistoryFilter {
                offset: params.offset,
                limit: params.limit,
            },
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetAnalysisHistoryResponse { data: records }))
}
