use crate::models::{AnalysisPayload, ClinicalInput, PatientInfo, PatientIntake, RenderedReport};
use crate::services::{analyze, AnalyzeError};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::IntoResponse,
    Extension, Form, Json,
};
use service_core::middleware::request_id::RequestId;

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub patient: PatientInfo,
    pub input: ClinicalInput,
    pub report: RenderedReport,
}

impl From<AnalysisPayload> for ReportTemplate {
    fn from(payload: AnalysisPayload) -> Self {
        Self {
            patient: payload.patient,
            input: payload.input,
            report: payload.report,
        }
    }
}

/// An unreadable body carries no name or symptoms, so it is analysed as an
/// empty intake and rejected by the required-field check.
fn intake_or_empty<T, E>(
    extracted: Result<T, E>,
    into_intake: fn(T) -> PatientIntake,
) -> PatientIntake
where
    E: std::fmt::Display,
{
    match extracted {
        Ok(body) => into_intake(body),
        Err(rejection) => {
            tracing::info!(error = %rejection, "Unreadable intake body");
            PatientIntake::default()
        }
    }
}

/// `POST /analyze`: form submission, answered with the report page.
#[tracing::instrument(skip_all, fields(request_id = %request_id.as_str()))]
pub async fn analyze_form(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    form: Result<Form<PatientIntake>, FormRejection>,
) -> Result<ReportTemplate, AnalyzeError> {
    let intake = intake_or_empty(form, |Form(intake)| intake);
    let payload = analyze(&state, intake).await?;
    Ok(ReportTemplate::from(payload))
}

/// `POST /api/analyze`: the same flow for JSON clients.
#[tracing::instrument(skip_all, fields(request_id = %request_id.as_str()))]
pub async fn analyze_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    json: Result<Json<PatientIntake>, JsonRejection>,
) -> Result<impl IntoResponse, AnalyzeError> {
    let intake = intake_or_empty(json, |Json(intake)| intake);
    let payload = analyze(&state, intake).await?;
    Ok(Json(payload))
}
