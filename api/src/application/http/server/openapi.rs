use crate::application::http::{
    chat::router::ChatApiDoc, food_analysis::router::FoodAnalysisApiDoc,
    report::router::ReportApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Platelens API"
    ),
    paths(crate::application::http::health::health),
    nest(
        (path = "/users/{user_id}/analyses", api = FoodAnalysisApiDoc),
        (path = "/users/{user_id}/analyses", api = ReportApiDoc),
        (path = "/users/{user_id}/analyses", api = ChatApiDoc),
    )
)]
pub struct ApiDoc;
