use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::survey::catalog::{DefinitionSource, InMemoryDefinitionSource, SourceError};
use crate::workflows::survey::definition::SurveyDefinition;
use crate::workflows::survey::scoring::{ReasonSynthesizer, ScoringEngine};
use crate::workflows::survey::{survey_router, SurveyService};

pub(super) fn two_target_categories() -> Value {
    json!([
        { "id": "mkt", "name": "Marketing", "icon": "📣" },
        { "id": "pm", "name": "Product Management", "icon": "🧭" }
    ])
}

pub(super) fn choice_options() -> Value {
    json!([
        { "value": "x", "weights": { "mkt": 2 } },
        { "value": "y", "weights": { "pm": 1 } }
    ])
}

pub(super) fn general_document() -> Value {
    json!({
        "questions": [
            { "id": "q1", "type": "likert", "category": "branding",
              "weights": { "mkt": 1.0, "pm": 0.5 } },
            { "id": "q2", "type": "single_choice", "category": "planning",
              "options": choice_options() },
            { "id": "q3", "type": "multiple_choice", "category": "growth",
              "options": choice_options() },
            { "id": "q4", "type": "text", "text": "Describe a project you led",
              "weights": { "pm": 1.0 } }
        ],
        "job_categories": two_target_categories(),
        "scoring_rules": { "preference_weight": 0.4, "fit_weight": 0.6 }
    })
}

pub(super) fn spec_check_document() -> Value {
    json!({
        "job_category": "marketing",
        "subtypes": [
            { "id": "brand", "name": "Brand Marketer", "description": "Shapes brand identity" },
            { "id": "performance", "name": "Performance Marketer" },
            { "id": "content", "name": "Content Marketer" },
            { "id": "crm", "name": "CRM Marketer" }
        ],
        "questions": [
            { "id": "s1", "text": "Planned a brand campaign", "weights": { "brand": 1.0, "content": 0.5 } },
            { "id": "s2", "text": "Optimized paid ads", "weights": { "performance": 1.0 } },
            { "id": "s3", "text": "Wrote long-form content", "weights": { "content": 1.0, "brand": 0.25 } }
        ]
    })
}

pub(super) fn general_definition() -> SurveyDefinition {
    SurveyDefinition::general_from_value("survey-general", general_document())
        .expect("fixture decodes")
}

pub(super) fn definition_with_questions(questions: Value) -> SurveyDefinition {
    SurveyDefinition::general_from_value(
        "survey-general",
        json!({ "questions": questions, "job_categories": two_target_categories() }),
    )
    .expect("fixture decodes")
}

pub(super) fn spec_check_definition() -> SurveyDefinition {
    SurveyDefinition::spec_check_from_value(spec_check_document()).expect("fixture decodes")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ReasonSynthesizer::default())
}

pub(super) fn catalog() -> InMemoryDefinitionSource {
    InMemoryDefinitionSource::new()
        .with_document("survey-general", general_document())
        .with_document("spec-check-marketing", spec_check_document())
        .with_document(
            "survey-empty",
            json!({ "questions": [], "job_categories": [] }),
        )
        .with_document(
            "survey-broken",
            json!({ "questions": [ { "id": "q1", "type": "ranking" } ], "job_categories": [] }),
        )
}

pub(super) fn build_service() -> SurveyService<InMemoryDefinitionSource> {
    SurveyService::new(Arc::new(catalog()), ReasonSynthesizer::default())
}

pub(super) fn survey_router_with_service<S>(service: SurveyService<S>) -> axum::Router
where
    S: DefinitionSource + 'static,
{
    survey_router(Arc::new(service))
}

/// Source whose backing store is down.
pub(super) struct UnavailableSource;

impl DefinitionSource for UnavailableSource {
    fn load(&self, _slug: &str) -> Result<Value, SourceError> {
        Err(SourceError::Unavailable(std::io::Error::other(
            "object store offline",
        )))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
