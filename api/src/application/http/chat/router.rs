use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    ask_about_food::{__path_ask_about_food, ask_about_food},
    get_chat_transcript::{__path_get_chat_transcript, get_chat_transcript},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(ask_about_food, get_chat_transcript))]
pub struct ChatApiDoc;

pub fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!(
            "{}/users/{{user_id}}/analyses/{{analysis_id}}/chat",
            state.args.server.root_path
        ),
        post(ask_about_food).get(get_chat_transcript),
    )
}
