use platelens_core::domain::image::entities::ImageSource;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const MAX_CUSTOM_PROMPT_LEN: usize = 500;

/// Multipart body of `POST /users/{user_id}/analyses`; documentation only,
/// the handler reads the fields one by one.
#[derive(Debug, ToSchema)]
pub struct AnalyzeFoodImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub source: Option<ImageSource>,
    #[schema(max_length = 500, example = "I'm diabetic, is this suitable?")]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GetAnalysisHistoryParams {
    #[schema(example = 0)]
    pub offset: Option<u32>,
    #[schema(example = 20)]
    pub limit: Option<u32>,
}
