use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewGenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Client error: {0}")]
    ClientError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Gemini API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No image was generated for directive: {directive}")]
    NoImage { directive: String },
    #[error("{0}")]
    AllViewsFailed(String),
}

impl ViewGenError {
    /// True for errors that describe a whole batch rather than a single view.
    pub fn is_batch_failure(&self) -> bool {
        matches!(self, ViewGenError::AllViewsFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, ViewGenError>;
