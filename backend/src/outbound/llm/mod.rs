//! Language model adapters.

mod llama_cpp;

pub use llama_cpp::{LlamaCppModel, check_model_file};
