//! The engine trait.
//!
//! One method per engine entry point; each is a single blocking-semantics
//! round trip awaited to completion. Implementations must not retry or
//! enforce timeouts — failure handling belongs to the request boundary.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::model::{
    BlockingAnimationResult, CommunityAnalysisResult, CommunityRequest, CriticalPathQuery,
    CriticalPathResult, FinalInfluenceResult, InfluenceQuery, MaximizationResult,
    MinimizationResult, RunRequest, SimulationResult,
};

/// External graph-influence computation engine.
///
/// The engine is stateless per call: every method receives the full
/// parameter set it needs, and result identifiers it assigns are opaque,
/// globally unique strings.
#[async_trait]
pub trait InfluenceEngine: Send + Sync {
    /// Select a seed set of `budget` nodes maximizing expected influence.
    async fn run_maximization(&self, req: &RunRequest) -> Result<MaximizationResult, EngineError>;

    /// Select a blocking set minimizing influence from the request's seeds.
    ///
    /// The result's `seed_nodes` is authoritative: when the request's seed
    /// list was empty the engine generates one, and only the result records
    /// what was actually used.
    async fn run_minimization(&self, req: &RunRequest) -> Result<MinimizationResult, EngineError>;

    /// Converged influence expectation for a fixed seed/blocking set.
    async fn final_influence(&self, query: &InfluenceQuery)
        -> Result<FinalInfluenceResult, EngineError>;

    /// Full stepped diffusion simulation (raw, possibly non-monotone).
    async fn stepped_simulation(&self, query: &InfluenceQuery)
        -> Result<SimulationResult, EngineError>;

    /// Before/after animation with blocking nodes active, including
    /// recovery events.
    async fn blocking_animation(&self, query: &InfluenceQuery)
        -> Result<BlockingAnimationResult, EngineError>;

    /// From-scratch community discovery for one cohesion criterion.
    async fn community_from_scratch(&self, req: &CommunityRequest)
        -> Result<CommunityAnalysisResult, EngineError>;

    /// Critical propagation paths for a finished computation.
    async fn critical_paths(&self, query: &CriticalPathQuery)
        -> Result<CriticalPathResult, EngineError>;
}
