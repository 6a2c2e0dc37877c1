use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{generate_timestamp, value_objects::UserId},
    food_analysis::helpers::extract_total_calories,
    image::entities::ImageReference,
};

/// One stored result of a food-image evaluation. Never mutated after it has
/// been appended to the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    pub raw_response: String,
    pub total_calories: Option<u32>,
    pub image: ImageReference,
}

impl AnalysisRecord {
    pub fn new(
        user_id: UserId,
        model: String,
        custom_prompt: Option<String>,
        raw_response: String,
        image: ImageReference,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();
        let total_calories = extract_total_calories(&raw_response);

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            created_at: now,
            model,
            custom_prompt,
            raw_response,
            total_calories,
            image,
        }
    }
}
