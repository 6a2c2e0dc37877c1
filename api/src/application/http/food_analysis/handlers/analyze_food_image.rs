use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use platelens_core::domain::{
    common::{entities::app_errors::CoreError, value_objects::UserId},
    food_analysis::{
        ports::FoodAnalysisService,
        value_objects::{AnalysisView, AnalyzeFoodInput},
    },
    image::{
        entities::ImageSource,
        value_objects::{ImageIntakeInput, MAX_IMAGE_SIZE},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::{AnalyzeFoodImageForm, MAX_CUSTOM_PROMPT_LEN},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFoodResponse {
    pub data: AnalysisView,
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The body limit trips before intake can size-check the image
        ApiError::from(CoreError::ImageTooLarge {
            max_bytes: MAX_IMAGE_SIZE,
        })
    } else {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
    }
}

#[utoipa::path(
    post,
    path = "",
    tag = "food-analysis",
    summary = "Analyze a food photo",
    description = "Validates the uploaded photo, asks the vision model for a nutrition analysis and appends the result to the user's history",
    request_body(content = AnalyzeFoodImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = AnalyzeFoodResponse),
        (status = 400, description = "Missing or invalid image"),
        (status = 413, description = "Image larger than 10 MB"),
        (status = 502, description = "The AI service failed"),
        (status = 503, description = "GOOGLE_API_KEY is not configured"),
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
    ),
)]
pub async fn analyze_food_image(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeFoodResponse>, ApiError> {
    let user_id = UserId::parse(user_id).map_err(ApiError::from)?;

    let mut image_data: Option<Bytes> = None;
    let mut declared_mime_type: Option<String> = None;
    let mut original_name: Option<String> = None;
    let mut source = ImageSource::default();
    let mut custom_prompt: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                // octet-stream means the client did not know; sniff instead
                declared_mime_type = field
                    .content_type()
                    .filter(|ct| *ct != "application/octet-stream")
                    .map(|s| s.to_string());
                original_name = field.file_name().map(|s| s.to_string());
                image_data = Some(field.bytes().await.map_err(multipart_error)?);
            }
            "source" => {
                let value = field.text().await.map_err(multipart_error)?;
                source = value.parse().map_err(ApiError::from)?;
            }
            "custom_prompt" => {
                let value = field.text().await.map_err(multipart_error)?;
                if value.chars().count() > MAX_CUSTOM_PROMPT_LEN {
                    return Err(ApiError::BadRequest(format!(
                        "custom_prompt must be at most {} characters",
                        MAX_CUSTOM_PROMPT_LEN
                    )));
                }
                custom_prompt = Some(value);
            }
            _ => {}
        }
    }

    let image_data = image_data
        .ok_or_else(|| ApiError::BadRequest("Please upload an image first".to_string()))?;

    let view = state
        .service
        .analyze_food(AnalyzeFoodInput {
            user_id,
            image: ImageIntakeInput {
                data: image_data,
                declared_mime_type,
                original_name,
                source,
            },
            custom_prompt,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(AnalyzeFoodResponse { data: view }))
}
