//! Port for a loaded language model.
//!
//! Adapters own whatever native or remote resource performs inference. The
//! domain never calls [`LanguageModel::complete`] concurrently; see
//! [`crate::domain::TextGenerator`].

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by language model adapters.
    pub enum LanguageModelError {
        /// The model file or runner could not be reached.
        Unavailable { message: String } => "language model unavailable: {message}",
        /// The model accepted the prompt but inference failed.
        Inference { message: String } => "language model inference failed: {message}",
    }
}

/// Sampling parameters forwarded with every prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to predict.
    pub max_tokens: u32,
}

/// A model loaded into memory and ready to complete prompts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt`, returning the raw generated text.
    async fn complete(
        &self,
        prompt: &str,
        params: &InferenceParams,
    ) -> Result<String, LanguageModelError>;

    /// Release the model. Called at most once, before the handle is dropped.
    async fn close(&self);
}
