use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    #[default]
    Upload,
    Camera,
}

impl ImageSource {
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Upload => "upload",
            ImageSource::Camera => "camera",
        }
    }
}

impl FromStr for ImageSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload" => Ok(ImageSource::Upload),
            "camera" => Ok(ImageSource::Camera),
            other => Err(CoreError::Invalid(format!("unknown image source '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImageMimeType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "jpg",
            ImageMimeType::Png => "png",
        }
    }

    /// Maps a client-declared content type. `image/jpg` is not registered but
    /// browsers still send it.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageMimeType::Jpeg),
            "image/png" => Some(ImageMimeType::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated food photo, ready to be stored and sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodImage {
    pub data: Bytes,
    pub mime_type: ImageMimeType,
    pub width: u32,
    pub height: u32,
    pub original_name: Option<String>,
    pub source: ImageSource,
}

impl FoodImage {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Pointer to a stored image artifact, persisted inside each analysis record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageReference {
    pub path: String,
    pub mime_type: ImageMimeType,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub checksum_sha256: String,
    pub source: ImageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}
