use crate::error::{Result, ViewGenError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// The photograph every view is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    pub data: String, // Base64 encoded
    pub media_type: String,
}

impl SourceImage {
    pub fn new(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self::new(STANDARD.encode(bytes), media_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub media_type: String,
    pub data: String, // Base64 encoded
}

impl EncodedImage {
    pub fn new(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| ViewGenError::SerializationError(e.to_string()))
    }
}
