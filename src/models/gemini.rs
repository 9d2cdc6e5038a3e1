use crate::models::{EncodedImage, SourceImage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// One user turn carrying the source image followed by the directive.
    pub fn for_view(source: &SourceImage, directive: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: source.media_type.clone(),
                            data: source.data.clone(),
                        },
                    },
                    Part::Text {
                        text: directive.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

// Variant order matters for untagged decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// First part, across all candidates, that carries inline image bytes.
    pub fn first_inline_image(&self) -> Option<EncodedImage> {
        self.candidates
            .iter()
            .flat_map(|candidate| candidate.content.parts.iter())
            .find_map(|part| match part {
                Part::InlineData { inline_data } if !inline_data.data.is_empty() => Some(
                    EncodedImage::new(inline_data.mime_type.clone(), inline_data.data.clone()),
                ),
                _ => None,
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let source = SourceImage::new("AAAA", "image/png");
        let request = GenerateContentRequest::for_view(&source, "Move the camera right");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "text": "Move the camera right" }
                    ]
                }],
                "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
            })
        );
    }

    #[test]
    fn test_extracts_first_inline_image_after_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here is the new angle." },
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(
            response.first_inline_image(),
            Some(EncodedImage::new("image/png", "Zmlyc3Q="))
        );
    }

    #[test]
    fn test_text_only_response_has_no_image() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't do that." }] }
            }]
        }))
        .unwrap();
        assert_eq!(response.first_inline_image(), None);

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(blocked.first_inline_image(), None);
    }

    #[test]
    fn test_unknown_parts_are_tolerated() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "thought": true, "thoughtSignature": "x" }] } },
                { "content": { "parts": [{ "inline_data": { "mime_type": "image/webp", "data": "d2VicA==" } }] } }
            ]
        }))
        .unwrap();
        assert_eq!(
            response.first_inline_image(),
            Some(EncodedImage::new("image/webp", "d2VicA=="))
        );
    }

    #[test]
    fn test_error_body() {
        let body: ApiErrorBody = serde_json::from_value(json!({
            "error": { "code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED" }
        }))
        .unwrap();
        assert_eq!(body.error.code, Some(429));
        assert_eq!(body.error.message, "Resource exhausted");
    }
}
