//! Boundary tests: status codes and `{"error": ...}` bodies on the router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cascade_api::routes::{router, AppState};
use cascade_api::translate::Translator;
use cascade_api::OperationMetrics;
use cascade_engine::{
    BlockingAnimationResult, CommunityAnalysisResult, CommunityRequest, CriticalPathQuery,
    CriticalPathResult, EngineError, FinalInfluenceResult, InfluenceEngine, InfluenceQuery,
    MaximizationResult, MinimizationResult, RunRequest, SimulationResult,
};
use cascade_session::InMemorySessionStore;

/// Engine whose every call fails; the lookups under test never reach it.
struct DownEngine;

#[async_trait]
impl InfluenceEngine for DownEngine {
    async fn run_maximization(&self, _: &RunRequest) -> Result<MaximizationResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn run_minimization(&self, _: &RunRequest) -> Result<MinimizationResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn final_influence(&self, _: &InfluenceQuery) -> Result<FinalInfluenceResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn stepped_simulation(&self, _: &InfluenceQuery) -> Result<SimulationResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn blocking_animation(
        &self,
        _: &InfluenceQuery,
    ) -> Result<BlockingAnimationResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn community_from_scratch(
        &self,
        _: &CommunityRequest,
    ) -> Result<CommunityAnalysisResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
    async fn critical_paths(&self, _: &CriticalPathQuery) -> Result<CriticalPathResult, EngineError> {
        Err(EngineError::Transport("engine offline".into()))
    }
}

fn app() -> axum::Router {
    let translator = Arc::new(Translator::new(
        Arc::new(DownEngine),
        Arc::new(InMemorySessionStore::new()),
    ));
    router(AppState {
        translator,
        metrics: Arc::new(OperationMetrics::new()),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let response = app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn unknown_result_id_maps_to_404_with_fixed_message() {
    let response = app()
        .oneshot(
            Request::get("/api/influence/final-state/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Result ID not found or has expired."
    );
}

#[tokio::test]
async fn validation_failure_maps_to_400() {
    let body = serde_json::json!({
        "dataset_id": "karate",
        "mode": "teleportation",
        "params": {
            "propagation_model": "IC",
            "probability_model": "WC",
            "budget": 5
        }
    });
    let response = app()
        .oneshot(
            Request::post("/api/influence/run")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("teleportation"));
}

#[tokio::test]
async fn engine_failure_maps_to_500_with_message() {
    let body = serde_json::json!({
        "dataset_id": "karate",
        "mode": "maximization",
        "params": {
            "propagation_model": "IC",
            "probability_model": "WC",
            "budget": 5
        }
    });
    let response = app()
        .oneshot(
            Request::post("/api/influence/run")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("engine offline"));
}

#[tokio::test]
async fn stats_reports_counters_and_sessions() {
    let app = app();

    // One failed run should show up in both its counter and the error count.
    let body = serde_json::json!({"dataset_id": "karate", "mode": "maximization",
        "params": {"propagation_model": "IC", "probability_model": "WC", "budget": 5}});
    let _ = app
        .clone()
        .oneshot(
            Request::post("/api/influence/run")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sessions"], 0);
    assert_eq!(json["runs"], 1);
    assert_eq!(json["errors"], 1);
}
