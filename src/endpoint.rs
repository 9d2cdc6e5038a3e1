use crate::{
    error::Result,
    models::{EncodedImage, SourceImage},
};
use async_trait::async_trait;
use std::sync::Arc;

/// A service that renders a new image from a source image and one directive.
///
/// Each call is independent. Implementations report a response without an
/// inline image as [`crate::ViewGenError::NoImage`].
#[async_trait]
pub trait ImageEndpoint: Send + Sync {
    async fn generate(&self, source: &SourceImage, directive: &str) -> Result<EncodedImage>;
}

#[async_trait]
impl<T: ImageEndpoint + ?Sized> ImageEndpoint for Arc<T> {
    async fn generate(&self, source: &SourceImage, directive: &str) -> Result<EncodedImage> {
        (**self).generate(source, directive).await
    }
}

#[async_trait]
impl<'a, T: ImageEndpoint + ?Sized> ImageEndpoint for &'a T {
    async fn generate(&self, source: &SourceImage, directive: &str) -> Result<EncodedImage> {
        (**self).generate(source, directive).await
    }
}
