//! Prompt completion endpoint backed by the local language model.
//!
//! ```text
//! POST /api/chat {"prompt":"Describe Paris"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Text to complete; must not be blank.
    #[schema(example = "Suggest three things to do in Lisbon")]
    pub prompt: Option<String>,
}

/// Completion returned by the model.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Generated text, trimmed.
    pub response: String,
}

/// Complete a prompt with the loaded model.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Completion", body = ChatResponse),
        (status = 400, description = "Prompt empty", body = ErrorSchema),
        (status = 503, description = "Model not loaded", body = ErrorSchema),
        (status = 500, description = "Generation failed", body = ErrorSchema)
    ),
    tags = ["chat"],
    operation_id = "chat"
)]
#[post("/chat")]
pub async fn chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatResponse>> {
    let prompt = payload.into_inner().prompt.unwrap_or_default();
    let response = state
        .text
        .generate(&prompt)
        .await
        .map_err(Error::from)?;
    debug!(chars = response.len(), "chat completion returned");
    Ok(web::Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::{MockTextGeneration, TextGenerationError};
    use crate::inbound::http::test_utils::{error_parts, in_memory_state, test_app};
    use crate::test_support::InMemoryDatabase;

    fn chat_request(body: Value) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/chat")
            .set_json(body)
            .to_request()
    }

    #[actix_web::test]
    async fn returns_generated_text() {
        let db = Arc::new(InMemoryDatabase::new());
        let mut state = in_memory_state(&db);
        let mut text = MockTextGeneration::new();
        text.expect_generate()
            .withf(|prompt| prompt == "Describe Paris")
            .times(1)
            .returning(|_| Ok("City of light.".to_owned()));
        state.text = Arc::new(text);
        let app = actix_test::init_service(test_app(state)).await;

        let response =
            actix_test::call_service(&app, chat_request(json!({ "prompt": "Describe Paris" })))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "response": "City of light." }));
    }

    #[rstest]
    #[case(json!({ "prompt": "   " }), StatusCode::BAD_REQUEST, "invalid_request")]
    #[case(json!({}), StatusCode::BAD_REQUEST, "invalid_request")]
    #[case(
        json!({ "prompt": "Describe Paris" }),
        StatusCode::SERVICE_UNAVAILABLE,
        "service_unavailable"
    )]
    #[actix_web::test]
    async fn generator_without_model(
        #[case] body: Value,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let db = Arc::new(InMemoryDatabase::new());
        let app = actix_test::init_service(test_app(in_memory_state(&db))).await;

        let response = actix_test::call_service(&app, chat_request(body)).await;

        assert_eq!(response.status(), status);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(error_parts(&body).0, code);
    }

    #[actix_web::test]
    async fn inference_failures_are_internal_errors() {
        let db = Arc::new(InMemoryDatabase::new());
        let mut state = in_memory_state(&db);
        let mut text = MockTextGeneration::new();
        text.expect_generate().returning(|_| {
            Err(TextGenerationError::Inference {
                message: "runner crashed".into(),
            })
        });
        state.text = Arc::new(text);
        let app = actix_test::init_service(test_app(state)).await;

        let response =
            actix_test::call_service(&app, chat_request(json!({ "prompt": "Describe Paris" })))
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
