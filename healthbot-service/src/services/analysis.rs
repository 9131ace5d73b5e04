//! Intake → prompt → generation → report.

use crate::models::{AnalysisPayload, Interpretation, PatientIntake, RenderedReport};
use crate::services::interpreter::interpret;
use crate::services::metrics::{self, AnalyzeOutcome};
use crate::services::providers::{GenerationRequest, ProviderError, JSON_MIME_TYPE};
use crate::startup::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Name and symptoms required";
pub const GENERATION_FAILED_MESSAGE: &str = "AI service failed. Try again.";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Name and symptoms required")]
    MissingFields,

    #[error("Generation failed: {0}")]
    Generation(#[from] ProviderError),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        match self {
            AnalyzeError::MissingFields => {
                AppError::BadRequest(anyhow::anyhow!(MISSING_FIELDS_MESSAGE)).into_response()
            }
            AnalyzeError::Generation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE).into_response()
            }
        }
    }
}

/// Run one analysis.
///
/// Required fields are checked before anything leaves the process. A provider
/// failure aborts the request; an unusable response does not, it is replaced
/// by the error report.
pub async fn analyze(
    state: &AppState,
    intake: PatientIntake,
) -> Result<AnalysisPayload, AnalyzeError> {
    if intake.validate().is_err() {
        metrics::record_analyze_outcome(AnalyzeOutcome::InvalidInput);
        tracing::info!("Rejected intake without name or symptoms");
        return Err(AnalyzeError::MissingFields);
    }

    let prompt = state.prompt_builder.build(&intake);
    let request = GenerationRequest {
        system_instruction: prompt.system_instruction,
        user_message: prompt.user_message,
        response_mime_type: Some(JSON_MIME_TYPE.to_string()),
    };

    let provider = state.text_provider.as_ref();
    let started = Instant::now();
    let result = provider.generate(&request).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        started.elapsed().as_secs_f64(),
    );

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                provider = provider.name(),
                model = provider.model(),
                error = %e,
                "AI generation failed"
            );
            metrics::record_provider_error(provider.name(), e.kind());
            metrics::record_analyze_outcome(AnalyzeOutcome::ProviderError);
            return Err(e.into());
        }
    };

    metrics::record_tokens(
        provider.model(),
        response.input_tokens,
        response.output_tokens,
    );

    let interpretation = interpret(response.text.as_deref());
    let outcome = match &interpretation {
        Interpretation::Parsed(report) => {
            tracing::info!(
                risk_level = %report.risk_level,
                finish_reason = ?response.finish_reason,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Health report generated"
            );
            AnalyzeOutcome::Report
        }
        Interpretation::Malformed { reason } => {
            tracing::warn!(
                reason = %reason,
                finish_reason = ?response.finish_reason,
                "Substituting error report for unusable AI response"
            );
            AnalyzeOutcome::Malformed
        }
    };
    metrics::record_analyze_outcome(outcome);

    Ok(AnalysisPayload {
        patient: intake.patient(),
        input: intake.clinical_input(),
        report: RenderedReport::from(interpretation),
    })
}
