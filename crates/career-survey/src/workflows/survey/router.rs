use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::catalog::DefinitionSource;
use super::error::SurveyError;
use super::service::{SpecCheckSubmission, SurveyService, SurveySubmission};

/// Router builder exposing the survey scoring endpoints.
pub fn survey_router<S>(service: Arc<SurveyService<S>>) -> Router
where
    S: DefinitionSource + 'static,
{
    Router::new()
        .route("/api/v1/survey/submit", post(submit_handler::<S>))
        .route(
            "/api/v1/survey/spec-check/submit",
            post(spec_check_submit_handler::<S>),
        )
        .route(
            "/api/v1/survey/spec-check/:job_category",
            get(spec_check_definition_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    S: DefinitionSource + 'static,
{
    match service.submit_general(submission) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn spec_check_submit_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(submission): axum::Json<SpecCheckSubmission>,
) -> Response
where
    S: DefinitionSource + 'static,
{
    match service.submit_spec_check(submission) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn spec_check_definition_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path(job_category): Path<String>,
) -> Response
where
    S: DefinitionSource + 'static,
{
    match service.spec_check_definition(&job_category) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SurveyError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}
