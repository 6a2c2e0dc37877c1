use axum::extract::{Path, State};
use platelens_core::domain::{
    chat::{
        ports::ChatService,
        value_objects::{AskQuestionInput, ChatReply},
    },
    common::value_objects::UserId,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    chat::validators::AskQuestionRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AskAboutFoodResponse {
    pub data: ChatReply,
}

#[utoipa::path(
    post,
    path = "/{analysis_id}/chat",
    tag = "chat",
    summary = "Ask a follow-up question",
    description = "Asks the chat model about an analysed meal, with the photo, the earlier analysis and the conversation so far as context",
    responses(
        (status = 200, body = AskAboutFoodResponse),
        (status = 404, description = "Analysis not found"),
        (status = 502, description = "The AI service failed"),
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
    request_body = AskQuestionRequest
)]
pub async fn ask_about_food(
    State(state): State<AppState>,
    Path((user_id, analysis_id)): Path<(String, Uuid)>,
    ValidateJson(payload): ValidateJson<AskQuestionRequest>,
) -> Result<Response<AskAboutFoodResponse>, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;

    let reply = state
        .service
        .ask_about_food(AskQuestionInput {
            user_id,
            analysis_id,
            question: payload.question,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AskAboutFoodResponse { data: reply }))
}
