//! llama.cpp runner adapter for the [`LanguageModel`] port.
//!
//! The GGUF weights are served by a local llama.cpp server. Loading verifies
//! the configured model file and that the runner answers its health probe;
//! prompts are forwarded to `POST {endpoint}/completion`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::domain::GenerationSettings;
use crate::domain::ports::{InferenceParams, LanguageModel, LanguageModelError};

const GGUF_MAGIC: &[u8; 4] = b"GGUF";

/// Completion request accepted by the llama.cpp server.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    temperature: f32,
    n_predict: u32,
}

/// Subset of the llama.cpp completion response used here.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Language model served by a local llama.cpp runner.
#[derive(Debug)]
pub struct LlamaCppModel {
    client: Client,
    completion_url: Url,
    model_path: PathBuf,
}

fn unavailable(message: impl Into<String>) -> LanguageModelError {
    LanguageModelError::unavailable(message)
}

fn read_magic(path: &Path) -> io::Result<[u8; 4]> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "model path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut file = directory.open(Path::new(file_name))?;
    let mut magic = [0_u8; 4];
    file.read_exact(&mut magic)?;
    Ok(magic)
}

/// Verify that `path` names a readable GGUF model file.
///
/// # Errors
///
/// Returns [`LanguageModelError::Unavailable`] when the file is missing,
/// unreadable, or lacks the GGUF header.
pub fn check_model_file(path: &Path) -> Result<(), LanguageModelError> {
    let magic = read_magic(path)
        .map_err(|err| unavailable(format!("model file '{}': {err}", path.display())))?;
    if &magic != GGUF_MAGIC {
        return Err(unavailable(format!(
            "model file '{}' is not in GGUF format",
            path.display()
        )));
    }
    Ok(())
}

fn endpoint_url(endpoint: &Url, path: &str) -> Result<Url, LanguageModelError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .map_err(|err| unavailable(format!("invalid model endpoint '{endpoint}': {err}")))
}

impl LlamaCppModel {
    /// Validate the model file and connect to the runner at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageModelError::Unavailable`] when the model file is
    /// invalid or the runner does not answer its health probe.
    pub async fn load(
        model_path: &Path,
        endpoint: &Url,
        settings: &GenerationSettings,
    ) -> Result<Self, LanguageModelError> {
        check_model_file(model_path)?;

        let client = Client::new();
        let health_url = endpoint_url(endpoint, "health")?;
        let response = client
            .get(health_url.clone())
            .send()
            .await
            .map_err(|err| unavailable(format!("runner at {health_url} unreachable: {err}")))?;
        if !response.status().is_success() {
            return Err(unavailable(format!(
                "runner at {health_url} reported {}",
                response.status()
            )));
        }

        info!(
            model = %model_path.display(),
            endpoint = %endpoint,
            context_size = settings.context_size,
            gpu_layers = settings.gpu_layers,
            "language model loaded"
        );
        Ok(Self {
            client,
            completion_url: endpoint_url(endpoint, "completion")?,
            model_path: model_path.to_path_buf(),
        })
    }
}

#[async_trait]
impl LanguageModel for LlamaCppModel {
    async fn complete(
        &self,
        prompt: &str,
        params: &InferenceParams,
    ) -> Result<String, LanguageModelError> {
        let body = CompletionRequest {
            prompt,
            temperature: params.temperature,
            n_predict: params.max_tokens,
        };
        let response = self
            .client
            .post(self.completion_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LanguageModelError::inference(format!(
                "runner returned {status}: {text}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| LanguageModelError::inference(err.to_string()))?;
        debug!(chars = completion.content.len(), "completion received");
        Ok(completion.content)
    }

    async fn close(&self) {
        info!(model = %self.model_path.display(), "language model released");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::TcpListener;

    use actix_web::{App, HttpResponse, HttpServer, web};
    use rstest::rstest;
    use serde_json::{Value, json};
    use tempfile::NamedTempFile;

    use super::*;

    fn model_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents).expect("write fixture");
        file
    }

    #[rstest]
    fn accepts_gguf_header() {
        let file = model_file(b"GGUF\x03\x00\x00\x00");
        assert!(check_model_file(file.path()).is_ok());
    }

    #[rstest]
    #[case(b"GGML\x01".as_slice())]
    #[case(b"GG".as_slice())]
    fn rejects_non_gguf_files(#[case] contents: &[u8]) {
        let file = model_file(contents);
        let error = check_model_file(file.path()).expect_err("not gguf");
        assert!(matches!(error, LanguageModelError::Unavailable { .. }));
    }

    #[rstest]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = check_model_file(&dir.path().join("absent.gguf")).expect_err("missing");
        assert!(matches!(error, LanguageModelError::Unavailable { .. }));
    }

    #[rstest]
    #[case("http://127.0.0.1:8081", "http://127.0.0.1:8081/completion")]
    #[case("http://runner.local/llama/", "http://runner.local/llama/completion")]
    #[case("http://runner.local/llama", "http://runner.local/llama/completion")]
    fn completion_url_keeps_endpoint_path(#[case] endpoint: &str, #[case] expected: &str) {
        let endpoint = Url::parse(endpoint).expect("valid url");
        let url = endpoint_url(&endpoint, "completion").expect("joined");
        assert_eq!(url.as_str(), expected);
    }

    async fn completion(body: web::Json<Value>) -> HttpResponse {
        assert_eq!(body["prompt"], "Describe Paris");
        assert_eq!(body["n_predict"], 256);
        HttpResponse::Ok().json(json!({ "content": "  City of light. ", "stop": true }))
    }

    fn spawn_runner() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind runner");
        let port = listener.local_addr().expect("runner addr").port();
        let server = HttpServer::new(|| {
            App::new()
                .route("/health", web::get().to(HttpResponse::Ok))
                .route("/completion", web::post().to(completion))
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        actix_web::rt::spawn(server);
        Url::parse(&format!("http://127.0.0.1:{port}")).expect("runner url")
    }

    #[actix_web::test]
    async fn load_then_complete_against_runner() {
        let file = model_file(b"GGUF\x03\x00\x00\x00");
        let endpoint = spawn_runner();
        let settings = GenerationSettings::default();

        let model = LlamaCppModel::load(file.path(), &endpoint, &settings)
            .await
            .expect("model loads");
        let text = model
            .complete("Describe Paris", &settings.inference_params())
            .await
            .expect("completion");

        assert_eq!(text, "  City of light. ");
    }

    #[actix_web::test]
    async fn load_fails_when_runner_unreachable() {
        let file = model_file(b"GGUF\x03\x00\x00\x00");
        let closed = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = closed.local_addr().expect("addr").port();
        drop(closed);
        let endpoint = Url::parse(&format!("http://127.0.0.1:{port}")).expect("url");

        let error = LlamaCppModel::load(file.path(), &endpoint, &GenerationSettings::default())
            .await
            .expect_err("unreachable runner");
        assert!(matches!(error, LanguageModelError::Unavailable { .. }));
    }
}
