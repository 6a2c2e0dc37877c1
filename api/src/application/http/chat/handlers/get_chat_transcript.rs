use axum::extract::{Path, State};
use platelens_core::domain::{
    chat::{entities::ChatMessage, ports::ChatService},
    common::value_objects::UserId,
    food_analysis::value_objects::GetAnalysisInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetChatTranscriptResponse {
    pub data: Vec<ChatMessage>,
}

#[utoipa::path(
    get,
    path = "/{analysis_id}/chat",
    tag = "chat",
    summary = "Get the chat transcript",
    responses(
        (status = 200, body = GetChatTranscriptResponse),
        (status = 404, description = "Analysis not found"),
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
)]
pub async fn get_chat_transcript(
    State(state): State<AppState>,
    Path((user_id, analysis_id)): Path<(String, Uuid)>,
) -> Result<Response<GetChatTranscriptResponse>, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;

    let transcript = state
        .service
        .get_chat_transcript(GetAnalysisInput {
            user_id,
            analysis_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetChatTranscriptResponse { data: transcript }))
}
