//! Re-render one photograph from several camera angles.
//!
//! A [`BatchGenerator`] sends the source image together with each directive of
//! an [`AngleCatalog`] to an [`ImageEndpoint`] concurrently, waits for every
//! call to settle, and keeps whichever views came back.

pub mod catalog;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod logger;
pub mod models;

pub use catalog::AngleCatalog;
pub use config::{Config, GeminiConfig, GeneratorConfig};
pub use endpoint::ImageEndpoint;
pub use error::{Result, ViewGenError};
pub use gemini::{GeminiClient, ImageClient};
pub use generator::BatchGenerator;
pub use models::{
    BatchReport, EncodedImage, GenerationOutcome, OutcomeResult, SourceImage, ViewSpec,
};

/// Generates every view of `catalog` for `source` through Gemini.
pub async fn generate_views(
    client: &GeminiClient,
    source: &SourceImage,
    catalog: &AngleCatalog,
) -> Result<Vec<EncodedImage>> {
    BatchGenerator::new(client.image())
        .generate_views(source, catalog)
        .await
}
