use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::survey::answers::AnswerSet;
use crate::workflows::survey::router::{spec_check_definition_handler, submit_handler};
use crate::workflows::survey::service::SurveySubmission;

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_handler_returns_scored_result() {
    let submission = SurveySubmission {
        survey_id: "survey-general".to_string(),
        answers: AnswerSet::new().with("q2", json!("y")),
        user_id: None,
    };

    let response = submit_handler(State(Arc::new(build_service())), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommended_job"]["job_id"], "pm");
    assert_eq!(body["job_scores"]["pm"], 100.0);
    assert_eq!(body["insights"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn spec_check_definition_handler_maps_missing_category_to_404() {
    let response = spec_check_definition_handler(
        State(Arc::new(build_service())),
        Path("astronaut".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("spec-check-astronaut")));
}

#[tokio::test]
async fn router_serves_spec_check_definition() {
    let app = survey_router_with_service(build_service());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/survey/spec-check/marketing")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, spec_check_document());
}

#[tokio::test]
async fn router_scores_spec_check_submission() {
    let app = survey_router_with_service(build_service());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/survey/spec-check/submit",
            json!({
                "job_category": "marketing",
                "answers": { "s1": 4, "s3": 1 }
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["job_category"], "marketing");
    assert_eq!(body["recommended_specialization"]["subtype_id"], "brand");
    assert_eq!(body["preference_top3"], body["fit_top3"]);
    assert_eq!(body["insights"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn router_rejects_malformed_answers_with_400() {
    let app = survey_router_with_service(build_service());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/survey/submit",
            json!({
                "survey_id": "survey-general",
                "answers": { "q3": "x" }
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().is_some_and(|message| message.contains("q3")));
}

#[tokio::test]
async fn router_maps_unknown_survey_to_404() {
    let app = survey_router_with_service(build_service());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/survey/submit",
            json!({ "survey_id": "survey-missing", "answers": {} }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_maps_broken_definition_to_500() {
    let app = survey_router_with_service(build_service());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/survey/submit",
            json!({ "survey_id": "survey-broken", "answers": {} }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.starts_with("internal aggregation error")));
}
