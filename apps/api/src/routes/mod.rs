pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/ats/match", post(handlers::handle_match))
        .route("/api/v1/ats/taxonomy", get(handlers::handle_taxonomy))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::scoring::AtsEngine;

    fn app() -> Router {
        build_router(AppState {
            engine: Arc::new(AtsEngine::with_defaults().unwrap()),
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_score_endpoint_returns_breakdown() {
        let (status, body) = post_json(
            "/api/v1/ats/score",
            json!({"text": "Experience\n- Built Rust services", "career_level": "senior", "role": "swe"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["score"].as_u64().unwrap() <= 100);
        assert_eq!(body["breakdown"].as_object().unwrap().len(), 9);
        assert_eq!(body["meta"]["profile"]["role"], "SWE");
    }

    #[tokio::test]
    async fn test_score_endpoint_accepts_empty_text() {
        let (status, body) = post_json("/api/v1/ats/score", json!({"text": ""})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["contact"]["score"], 20);
    }

    #[tokio::test]
    async fn test_match_endpoint_serializes_match_block() {
        let (status, body) = post_json(
            "/api/v1/ats/match",
            json!({"resume_text": "React and Docker", "jd_text": "React, Docker"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match"]["hard_skill_coverage_percent"], 100);
        assert!(body["general"]["score"].is_u64());
    }

    #[tokio::test]
    async fn test_match_endpoint_rejects_empty_jd() {
        let (status, body) = post_json(
            "/api/v1/ats/match",
            json!({"resume_text": "React", "jd_text": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_non_string_text_is_rejected() {
        let (status, _) = post_json("/api/v1/ats/score", json!({"text": 42})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_taxonomy_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ats/taxonomy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["categories"]["languages"]
            .as_array()
            .unwrap()
            .contains(&json!("rust")));
    }
}
