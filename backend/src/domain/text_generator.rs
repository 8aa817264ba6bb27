//! Owned handle to the language model.
//!
//! The handle lives behind a Tokio mutex: generation is serialised, and
//! shutdown takes the handle out so it is released exactly once.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    InferenceParams, LanguageModel, LanguageModelError, TextGeneration, TextGenerationError,
};

/// Fixed generation parameters applied to every prompt and model load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens generated per prompt.
    pub max_tokens: u32,
    /// Context window in tokens.
    pub context_size: u32,
    /// Layers offloaded to the GPU.
    pub gpu_layers: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 256,
            context_size: 4096,
            gpu_layers: 0,
        }
    }
}

impl GenerationSettings {
    /// Per-prompt sampling parameters.
    #[must_use]
    pub fn inference_params(&self) -> InferenceParams {
        InferenceParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Text generation backed by a single loaded model.
///
/// Built once before the HTTP server starts and shared through application
/// state; [`TextGenerator::shutdown`] runs after the server stops.
pub struct TextGenerator {
    model: Mutex<Option<Box<dyn LanguageModel>>>,
    params: InferenceParams,
}

impl TextGenerator {
    /// Wrap a loaded model.
    pub fn new(model: Box<dyn LanguageModel>, settings: &GenerationSettings) -> Self {
        Self {
            model: Mutex::new(Some(model)),
            params: settings.inference_params(),
        }
    }

    /// Generator holding no model; every prompt fails as not ready.
    #[must_use]
    pub fn uninitialised() -> Self {
        Self {
            model: Mutex::new(None),
            params: GenerationSettings::default().inference_params(),
        }
    }

    /// Report whether a model handle is held.
    pub async fn is_ready(&self) -> bool {
        self.model.lock().await.is_some()
    }

    /// Release the model. Later calls do nothing.
    pub async fn shutdown(&self) {
        let handle = self.model.lock().await.take();
        if let Some(model) = handle {
            model.close().await;
        }
    }
}

#[async_trait]
impl TextGeneration for TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        if prompt.trim().is_empty() {
            return Err(TextGenerationError::EmptyPrompt);
        }
        let guard = self.model.lock().await;
        let model = guard.as_ref().ok_or(TextGenerationError::NotReady)?;
        let completion = model
            .complete(prompt, &self.params)
            .await
            .map_err(|err| match err {
                LanguageModelError::Unavailable { message }
                | LanguageModelError::Inference { message } => {
                    TextGenerationError::Inference { message }
                }
            })?;
        Ok(completion.trim().to_owned())
    }
}
