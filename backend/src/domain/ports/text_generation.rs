//! Driving port for prompt completion.
use async_trait::async_trait;

use crate::domain::Error;

/// Failures raised while generating text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenerationError {
    /// The prompt was empty or whitespace.
    #[error("Prompt cannot be null or empty")]
    EmptyPrompt,
    /// No model handle is held, either never loaded or already shut down.
    #[error("LLM model is not initialized")]
    NotReady,
    /// The model failed while generating.
    #[error("text generation failed: {message}")]
    Inference {
        /// Adapter-provided detail.
        message: String,
    },
}

impl From<TextGenerationError> for Error {
    fn from(value: TextGenerationError) -> Self {
        match value {
            TextGenerationError::EmptyPrompt => Self::invalid_request(value.to_string()),
            TextGenerationError::NotReady => Self::service_unavailable(value.to_string()),
            TextGenerationError::Inference { .. } => Self::internal(value.to_string()),
        }
    }
}

/// Turn a prompt into a completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Generate a completion with surrounding whitespace trimmed.
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(TextGenerationError::EmptyPrompt, ErrorCode::InvalidRequest)]
    #[case(TextGenerationError::NotReady, ErrorCode::ServiceUnavailable)]
    #[case(
        TextGenerationError::Inference { message: "timeout".into() },
        ErrorCode::InternalError
    )]
    fn maps_to_domain_codes(#[case] error: TextGenerationError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
