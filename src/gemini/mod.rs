pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{Result, ViewGenError},
};
use reqwest::Client;
use std::time::Duration;

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(gemini_config: GeminiConfig) -> Result<Self> {
        let api_key = gemini_config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ViewGenError::ConfigError("Gemini API key is required".into()))?;

        let mut builder = Client::builder();
        if let Some(timeout_secs) = gemini_config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ViewGenError::ClientError(e.to_string()))?;

        log::debug!(
            "Gemini client targeting {} with model {}",
            gemini_config.base_url_or_default(),
            gemini_config.model_or_default()
        );

        Ok(Self {
            image_client: ImageClient::new(
                client,
                api_key,
                gemini_config.base_url_or_default(),
                gemini_config.model_or_default(),
            ),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
