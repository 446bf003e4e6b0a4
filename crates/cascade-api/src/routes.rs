//! HTTP surface.
//!
//! Endpoints:
//!   POST /api/influence/run                                → maximization / minimization
//!   GET  /api/influence/final-state/:result_id             → final influence expectation
//!   GET  /api/influence/step/:result_id                    → stepped animation (truncated)
//!   POST /api/influence/blocking-animation                 → before/after animation (raw)
//!   POST /api/influence/analysis/kl-core                   → (k,l)-core community
//!   POST /api/influence/analysis/k-core                    → k-core community
//!   POST /api/influence/analysis/k-truss                   → k-truss community
//!   POST /api/influence/analysis/critical-paths/:result_id → critical paths
//!   POST /api/influence/calculate-from-nodes               → ad-hoc evaluation
//!   GET  /api/health                                       → liveness probe
//!   GET  /api/stats                                        → counters + session count
//!
//! Every failure body is `{"error": <message>}` with a 4xx/5xx status; see
//! [`crate::error::ApiError`].

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use cascade_engine::{BlockingAnimationResult, CommunityAnalysisResult, CriticalPathResult};

use crate::error::ApiError;
use crate::metrics::OperationMetrics;
use crate::translate::{
    BlockingAnimationBody, CalculateFromNodesBody, CommunityBody, CriticalPathBody,
    FinalStateResponse, RunBody, RunResponse, StepAnimationResponse, Translator,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub metrics: Arc<OperationMetrics>,
}

/// Build the Cascade router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stats", get(stats))
        .route("/api/influence/run", post(run))
        .route("/api/influence/final-state/:result_id", get(final_state))
        .route("/api/influence/step/:result_id", get(step_animation))
        .route("/api/influence/blocking-animation", post(blocking_animation))
        .route("/api/influence/analysis/kl-core", post(kl_core))
        .route("/api/influence/analysis/k-core", post(k_core))
        .route("/api/influence/analysis/k-truss", post(k_truss))
        .route(
            "/api/influence/analysis/critical-paths/:result_id",
            post(critical_paths),
        )
        .route("/api/influence/calculate-from-nodes", post(calculate_from_nodes))
        .with_state(state)
}

/// Count an error without consuming it.
fn counted<T>(state: &AppState, result: Result<T, ApiError>) -> Result<Json<T>, ApiError> {
    match result {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            state.metrics.inc(&state.metrics.error_count);
            Err(e)
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(Serialize)]
struct StatsResponse {
    sessions: usize,
    runs: u64,
    followups: u64,
    analyses: u64,
    adhoc: u64,
    errors: u64,
    uptime_secs: u64,
    version: &'static str,
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let m = &state.metrics;
    Json(StatsResponse {
        sessions: state.translator.session_count(),
        runs: m.load(&m.run_count),
        followups: m.load(&m.followup_count),
        analyses: m.load(&m.analysis_count),
        adhoc: m.load(&m.adhoc_count),
        errors: m.load(&m.error_count),
        uptime_secs: m.uptime_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn run(
    State(state): State<AppState>,
    Json(body): Json<RunBody>,
) -> Result<Json<RunResponse>, ApiError> {
    state.metrics.inc(&state.metrics.run_count);
    counted(&state, state.translator.run(body).await)
}

async fn final_state(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<Json<FinalStateResponse>, ApiError> {
    state.metrics.inc(&state.metrics.followup_count);
    counted(&state, state.translator.final_state(&result_id).await)
}

async fn step_animation(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<Json<StepAnimationResponse>, ApiError> {
    state.metrics.inc(&state.metrics.followup_count);
    counted(&state, state.translator.step_animation(&result_id).await)
}

async fn blocking_animation(
    State(state): State<AppState>,
    Json(body): Json<BlockingAnimationBody>,
) -> Result<Json<BlockingAnimationResult>, ApiError> {
    state.metrics.inc(&state.metrics.followup_count);
    counted(&state, state.translator.blocking_animation(body).await)
}

async fn kl_core(
    State(state): State<AppState>,
    Json(body): Json<CommunityBody>,
) -> Result<Json<CommunityAnalysisResult>, ApiError> {
    state.metrics.inc(&state.metrics.analysis_count);
    counted(&state, state.translator.kl_core_analysis(body).await)
}

async fn k_core(
    State(state): State<AppState>,
    Json(body): Json<CommunityBody>,
) -> Result<Json<CommunityAnalysisResult>, ApiError> {
    state.metrics.inc(&state.metrics.analysis_count);
    counted(&state, state.translator.k_core_analysis(body).await)
}

async fn k_truss(
    State(state): State<AppState>,
    Json(body): Json<CommunityBody>,
) -> Result<Json<CommunityAnalysisResult>, ApiError> {
    state.metrics.inc(&state.metrics.analysis_count);
    counted(&state, state.translator.k_truss_analysis(body).await)
}

async fn critical_paths(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
    Json(body): Json<CriticalPathBody>,
) -> Result<Json<CriticalPathResult>, ApiError> {
    state.metrics.inc(&state.metrics.followup_count);
    counted(&state, state.translator.critical_paths(&result_id, body).await)
}

async fn calculate_from_nodes(
    State(state): State<AppState>,
    Json(body): Json<CalculateFromNodesBody>,
) -> Result<Json<FinalStateResponse>, ApiError> {
    state.metrics.inc(&state.metrics.adhoc_count);
    counted(&state, state.translator.calculate_from_nodes(body).await)
}
