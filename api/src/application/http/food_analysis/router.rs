use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use platelens_core::domain::image::value_objects::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

use super::handlers::{
    analyze_food_image::{__path_analyze_food_image, analyze_food_image},
    get_analysis::{__path_get_analysis, get_analysis},
    get_analysis_history::{__path_get_analysis_history, get_analysis_history},
};
use crate::application::http::server::app_state::AppState;

/// Room for the multipart framing and the text fields around the image.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_food_image, get_analysis_history, get_analysis))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/users/{{user_id}}/analyses", state.args.server.root_path),
            post(analyze_food_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
                .get(get_analysis_history),
        )
        .route(
            &format!(
                "{}/users/{{user_id}}/analyses/{{analysis_id}}",
                state.args.server.root_path
            ),
            get(get_analysis),
        )
}
