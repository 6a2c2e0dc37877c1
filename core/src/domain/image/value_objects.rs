use bytes::Bytes;

use crate::domain::image::entities::ImageSource;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone)]
pub struct ImageIntakeInput {
    pub data: Bytes,
    pub declared_mime_type: Option<String>,
    pub original_name: Option<String>,
    pub source: ImageSource,
}
