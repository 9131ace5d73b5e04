use crate::startup::AppState;
use askama::Template;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub languages: &'static [&'static str],
}

/// Languages offered on the intake form. The value is passed to the model
/// verbatim, so anything else posted by hand is accepted too.
pub const LANGUAGES: &[&str] = &["English", "Hindi", "Marathi"];

pub async fn index() -> impl IntoResponse {
    HomeTemplate {
        languages: LANGUAGES,
    }
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "healthbot-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe: the generation provider must be usable.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.text_provider.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Provider not ready");
        AppError::ServiceUnavailable
    })?;
    Ok(StatusCode::OK)
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}
