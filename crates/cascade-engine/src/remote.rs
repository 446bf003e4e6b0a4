//! HTTP-JSON engine backend.
//!
//! Forwards every contract call as one POST to the engine sidecar named by
//! `CASCADE_ENGINE_URL`. The client is built without a timeout: engine
//! calls are single-shot and non-cancelable, and the caller blocks for
//! their full duration.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::contract::InfluenceEngine;
use crate::error::EngineError;
use crate::model::{
    BlockingAnimationResult, CommunityAnalysisResult, CommunityRequest, CriticalPathQuery,
    CriticalPathResult, FinalInfluenceResult, InfluenceQuery, MaximizationResult,
    MinimizationResult, RunRequest, SimulationResult,
};

/// Engine backend speaking JSON over HTTP to a sidecar process.
pub struct RemoteEngine {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct EngineFailure {
    error: String,
}

impl RemoteEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn post<B, T>(&self, op: &str, body: &B) -> Result<T, EngineError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, op);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<EngineFailure>()
                .await
                .map(|f| f.error)
                .unwrap_or_else(|_| format!("engine returned status {status}"));
            return Err(EngineError::Rejected(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl InfluenceEngine for RemoteEngine {
    async fn run_maximization(&self, req: &RunRequest) -> Result<MaximizationResult, EngineError> {
        self.post("maximization", req).await
    }

    async fn run_minimization(&self, req: &RunRequest) -> Result<MinimizationResult, EngineError> {
        self.post("minimization", req).await
    }

    async fn final_influence(
        &self,
        query: &InfluenceQuery,
    ) -> Result<FinalInfluenceResult, EngineError> {
        self.post("final-influence", query).await
    }

    async fn stepped_simulation(
        &self,
        query: &InfluenceQuery,
    ) -> Result<SimulationResult, EngineError> {
        self.post("stepped-simulation", query).await
    }

    async fn blocking_animation(
        &self,
        query: &InfluenceQuery,
    ) -> Result<BlockingAnimationResult, EngineError> {
        self.post("blocking-animation", query).await
    }

    async fn community_from_scratch(
        &self,
        req: &CommunityRequest,
    ) -> Result<CommunityAnalysisResult, EngineError> {
        self.post("community", req).await
    }

    async fn critical_paths(
        &self,
        query: &CriticalPathQuery,
    ) -> Result<CriticalPathResult, EngineError> {
        self.post("critical-paths", query).await
    }
}
