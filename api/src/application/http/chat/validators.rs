use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AskQuestionRequest {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "question must be between 1 and 2000 characters"
    ))]
    #[schema(example = "Is this meal suitable for someone with diabetes?")]
    pub question: String,
}
