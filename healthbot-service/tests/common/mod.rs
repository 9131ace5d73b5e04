#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use healthbot_service::config::{
    GeminiSettings, HealthbotConfig, ObservabilitySettings, ServerSettings,
};
use healthbot_service::services::providers::TextProvider;
use healthbot_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const TEST_API_KEY: &str = "test-api-key";

/// Report the generation stub hands back for a healthy request.
pub const VALID_REPORT: &str = r#"{
  "summary": "Likely a viral upper respiratory infection.",
  "possibleCauses": ["Common cold", "Influenza"],
  "riskLevel": "Moderate",
  "precautions": ["Rest", "Stay hydrated"],
  "safeMedications": ["Paracetamol"],
  "dietPlan": {
    "day1": {"breakfast": "Oats", "lunch": "Dal rice", "dinner": "Vegetable soup"}
  },
  "nextSteps": ["Consult GP if fever persists beyond 3 days"]
}"#;

pub fn test_config(base_url: &str) -> HealthbotConfig {
    HealthbotConfig {
        common: CoreConfig { port: 0 },
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: "gemini-2.5-flash".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        server: ServerSettings {
            static_dir: "static".to_string(),
        },
        observability: ObservabilitySettings {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real application with the Gemini provider pointed at `base_url`.
    pub async fn spawn_with_gemini(base_url: &str) -> Self {
        let app = Application::build(test_config(base_url))
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    /// Spawn the application around an explicit provider.
    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(test_config("http://127.0.0.1:9"), provider)
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        Self {
            address,
            port,
            client,
        }
    }
}

/// What the Gemini stub saw.
#[derive(Default)]
pub struct Captured {
    pub api_key: Option<String>,
    pub body: Option<serde_json::Value>,
    pub calls: usize,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: serde_json::Value,
    captured: Arc<Mutex<Captured>>,
}

/// A local stand-in for the Gemini `generateContent` endpoint.
pub struct GeminiStub {
    pub base_url: String,
    pub captured: Arc<Mutex<Captured>>,
}

impl GeminiStub {
    /// Answer every request with `status` and `body`.
    pub async fn start(status: StatusCode, body: serde_json::Value) -> Self {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let state = StubState {
            status,
            body,
            captured: captured.clone(),
        };

        let router = Router::new()
            .route("/v1beta/models/:call", post(generate_content))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1beta", port),
            captured,
        }
    }

    /// Answer with a successful response whose first part carries `text`.
    pub async fn replying_with_text(text: &str) -> Self {
        Self::start(StatusCode::OK, candidate_response(text, "STOP")).await
    }
}

pub fn candidate_response(text: &str, finish_reason: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": finish_reason
        }],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 340,
            "totalTokenCount": 460
        }
    })
}

async fn generate_content(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut captured = state.captured.lock().await;
    captured.calls += 1;
    captured.api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.body = Some(body);

    (state.status, Json(state.body.clone()))
}
