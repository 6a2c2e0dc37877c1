use image::ImageFormat;
use tracing::debug;

use crate::domain::{
    common::entities::app_errors::CoreError,
    image::{
        entities::{FoodImage, ImageMimeType},
        value_objects::{ImageIntakeInput, MAX_IMAGE_SIZE},
    },
};

/// Validate an uploaded or captured photo and turn it into a [`FoodImage`].
///
/// The format is taken from the content, the declared type is only checked
/// against the accepted list. The image is decoded once so that truncated or
/// mislabelled files are rejected before anything is sent to the model.
pub fn intake_image(input: ImageIntakeInput) -> Result<FoodImage, CoreError> {
    if input.data.is_empty() {
        return Err(CoreError::EmptyImage);
    }

    if input.data.len() > MAX_IMAGE_SIZE {
        return Err(CoreError::ImageTooLarge {
            max_bytes: MAX_IMAGE_SIZE,
        });
    }

    if let Some(declared) = input.declared_mime_type.as_deref()
        && ImageMimeType::from_declared(declared).is_none()
    {
        return Err(CoreError::UnsupportedImageFormat);
    }

    let format = image::guess_format(&input.data).map_err(|_| CoreError::UnsupportedImageFormat)?;
    let mime_type = match format {
        ImageFormat::Jpeg => ImageMimeType::Jpeg,
        ImageFormat::Png => ImageMimeType::Png,
        _ => return Err(CoreError::UnsupportedImageFormat),
    };

    let decoded = image::load_from_memory_with_format(&input.data, format)
        .map_err(|e| CoreError::InvalidImage(e.to_string()))?;

    debug!(
        mime_type = %mime_type,
        width = decoded.width(),
        height = decoded.height(),
        size_bytes = input.data.len(),
        "image accepted"
    );

    Ok(FoodImage {
        width: decoded.width(),
        height: decoded.height(),
        data: input.data,
        mime_type,
        original_name: input.original_name,
        source: input.source,
    })
}
