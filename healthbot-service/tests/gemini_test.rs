//! Gemini provider tests against a local stub of the `generateContent` API.

mod common;

use axum::http::StatusCode;
use common::{candidate_response, test_config, GeminiStub, TestApp, TEST_API_KEY, VALID_REPORT};
use healthbot_service::services::providers::gemini::GeminiTextProvider;
use healthbot_service::services::providers::{
    FinishReason, GenerationRequest, ProviderError, TextProvider, JSON_MIME_TYPE,
};

fn request() -> GenerationRequest {
    GenerationRequest {
        system_instruction: "Return ONLY valid JSON.".to_string(),
        user_message: "Patient: Asha, 30, F".to_string(),
        response_mime_type: Some(JSON_MIME_TYPE.to_string()),
    }
}

fn provider(stub: &GeminiStub) -> GeminiTextProvider {
    GeminiTextProvider::new(test_config(&stub.base_url).gemini_config())
        .expect("Failed to build provider")
}

#[tokio::test]
async fn reads_text_from_first_candidate_part() {
    let stub = GeminiStub::replying_with_text(VALID_REPORT).await;

    let response = provider(&stub).generate(&request()).await.unwrap();

    assert_eq!(response.text.as_deref(), Some(VALID_REPORT));
    assert_eq!(response.input_tokens, 120);
    assert_eq!(response.output_tokens, 340);
    assert_eq!(response.finish_reason, FinishReason::Complete);
}

#[tokio::test]
async fn sends_system_instruction_mime_hint_and_key() {
    let stub = GeminiStub::replying_with_text("{}").await;

    provider(&stub).generate(&request()).await.unwrap();

    let captured = stub.captured.lock().await;
    assert_eq!(captured.calls, 1);
    assert_eq!(captured.api_key.as_deref(), Some(TEST_API_KEY));

    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Patient: Asha, 30, F");
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "Return ONLY valid JSON."
    );
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn empty_candidates_yield_no_text() {
    let stub = GeminiStub::start(StatusCode::OK, serde_json::json!({"candidates": []})).await;

    let response = provider(&stub).generate(&request()).await.unwrap();

    assert!(response.text.is_none());
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let stub = GeminiStub::start(
        StatusCode::TOO_MANY_REQUESTS,
        serde_json::json!({"error": {"message": "quota exceeded"}}),
    )
    .await;

    let err = provider(&stub).generate(&request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn auth_failure_is_api_error() {
    let stub = GeminiStub::start(
        StatusCode::FORBIDDEN,
        serde_json::json!({"error": {"message": "API key not valid"}}),
    )
    .await;

    let err = provider(&stub).generate(&request()).await.unwrap_err();

    match err {
        ProviderError::ApiError(message) => assert!(message.contains("403")),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn safety_block_is_content_filtered() {
    let stub = GeminiStub::start(StatusCode::OK, candidate_response("", "SAFETY")).await;

    let err = provider(&stub).generate(&request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::ContentFiltered));
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    // Port 9 (discard) is expected to refuse connections on test hosts.
    let provider = GeminiTextProvider::new(test_config("http://127.0.0.1:9/v1beta").gemini_config())
        .unwrap();

    let err = provider.generate(&request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::NetworkError(_)));
}

#[tokio::test]
async fn full_flow_through_gemini_stub() {
    let stub = GeminiStub::replying_with_text(VALID_REPORT).await;
    let app = TestApp::spawn_with_gemini(&stub.base_url).await;

    let response = app
        .client
        .post(format!("{}/api/analyze", app.address))
        .json(&serde_json::json!({
            "name": "Asha",
            "symptoms": "fever, cough",
            "age": "30",
            "gender": "F"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["patient"]["name"], "Asha");
    assert_eq!(body["report"]["riskLevel"], "Moderate");

    let captured = stub.captured.lock().await;
    let sent = captured.body.as_ref().unwrap();
    let user_message = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(user_message.contains("Patient: Asha, 30, F"));
    assert!(user_message.contains("Vitals: Temp=?, Pulse=?, BP=?, Weight=?"));
}

#[tokio::test]
async fn gemini_failure_surfaces_as_500() {
    let stub = GeminiStub::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({"error": {"message": "backend error"}}),
    )
    .await;
    let app = TestApp::spawn_with_gemini(&stub.base_url).await;

    let response = app
        .client
        .post(format!("{}/analyze", app.address))
        .form(&[("name", "Asha"), ("symptoms", "fever")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "AI service failed. Try again.");
}
