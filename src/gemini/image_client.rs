use crate::{
    endpoint::ImageEndpoint,
    error::{Result, ViewGenError},
    models::{
        gemini::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse},
        EncodedImage, SourceImage,
    },
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ImageClient {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    pub async fn generate(&self, source: &SourceImage, directive: &str) -> Result<EncodedImage> {
        let request = GenerateContentRequest::for_view(source, directive);

        log::debug!(
            "Requesting view from {} ({} source, {} bytes base64)",
            self.model,
            source.media_type,
            source.data.len()
        );

        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ViewGenError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ViewGenError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            log::error!("Gemini returned {}: {}", status, body);
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ViewGenError::ResponseError(e.to_string()))?;

        parsed
            .first_inline_image()
            .ok_or_else(|| ViewGenError::NoImage {
                directive: directive.to_string(),
            })
    }
}

fn api_error(status: u16, body: &str) -> ViewGenError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.to_string());

    ViewGenError::ApiError { status, message }
}

#[async_trait]
impl ImageEndpoint for ImageClient {
    async fn generate(&self, source: &SourceImage, directive: &str) -> Result<EncodedImage> {
        ImageClient::generate(self, source, directive).await
    }
}
