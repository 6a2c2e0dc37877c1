use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::UserId},
    image::entities::{FoodImage, ImageReference},
};

/// Port for persisting image artifacts
#[cfg_attr(test, mockall::automock)]
pub trait ImageStore: Send + Sync {
    /// Store the image under the user's namespace and return where it went
    fn save(
        &self,
        user_id: &UserId,
        image: &FoodImage,
    ) -> impl Future<Output = Result<ImageReference, CoreError>> + Send;

    /// Read back the bytes of a stored image
    fn load(
        &self,
        reference: &ImageReference,
    ) -> impl Future<Output = Result<Bytes, CoreError>> + Send;

    /// Remove a stored image. Removing one that is already gone succeeds.
    fn delete(
        &self,
        reference: &ImageReference,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
