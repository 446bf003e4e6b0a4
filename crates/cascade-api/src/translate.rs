//! Request translation.
//!
//! [`Translator`] turns each validated request into exactly one engine call
//! and shapes the typed result into the response for that operation. Runs
//! and community analyses capture session [`Snapshot`]s keyed by the
//! engine's result identifier; follow-up operations resolve those snapshots
//! and re-invoke the engine with the recorded parameters.
//!
//! Snapshot rule: `initial_nodes` is taken from the engine *result*, never
//! from the request. An empty client seed list legally triggers engine-side
//! seed generation, and caching the client's list would make later
//! final-state and animation queries silently diverge from the run the user
//! was shown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cascade_engine::{
    BlockingAnimationResult, CommunityAnalysisResult, CommunityKind, CommunityRequest,
    CriticalPathQuery, CriticalPathResult, InfluenceEngine, InfluenceQuery, MaximizationResult,
    MinimizationResult, NodeId, NodeState, RunRequest, SeedMode, SimulationStep,
};
use cascade_session::{SessionStore, Snapshot};

use crate::error::ApiError;
use crate::truncate;

// ─────────────────────────────────────────────
// Defaults and constants
// ─────────────────────────────────────────────

/// Negative-seed count used by minimization-style generation paths.
pub const DEFAULT_NEG_NUM: u32 = 10;

/// Seed budget for community analyses when the client names none.
pub const DEFAULT_SEED_BUDGET: u32 = 10;

/// Result identifier returned by the session-free ad-hoc evaluation.
pub const INTERACTIVE_RESULT_ID: &str = "interactive-result";

// ─────────────────────────────────────────────
// Closed wire vocabularies
// ─────────────────────────────────────────────

/// Operation selector of the run endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Maximization,
    Minimization,
}

impl RunMode {
    fn parse(token: &str) -> Result<Self, ApiError> {
        match token {
            "maximization" => Ok(Self::Maximization),
            "minimization" => Ok(Self::Minimization),
            other => Err(ApiError::Validation(format!(
                "invalid mode '{other}'; expected 'maximization' or 'minimization'"
            ))),
        }
    }
}

/// Path-selection strategy for critical-path extraction. Only one strategy
/// is supported today; the enum keeps the gap visible at compile time when
/// more arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSelection {
    Deepest,
}

impl PathSelection {
    fn parse(token: &str) -> Result<Self, ApiError> {
        match token {
            "deepest" => Ok(Self::Deepest),
            _ => Err(ApiError::Validation(
                "Invalid analysis type. Currently only 'deepest' is supported.".into(),
            )),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Deepest => "deepest",
        }
    }
}

// ─────────────────────────────────────────────
// Wire request bodies
// ─────────────────────────────────────────────

/// Body of `POST /api/influence/run`.
#[derive(Debug, Deserialize)]
pub struct RunBody {
    pub dataset_id: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub params: RunParamsBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunParamsBody {
    pub propagation_model: Option<String>,
    pub probability_model: Option<String>,
    pub budget: Option<u32>,
    #[serde(default)]
    pub seed_nodes: Vec<NodeId>,
    pub neg_num: Option<u32>,
    pub seed_generation_mode: Option<String>,
}

/// Body shared by the three community-analysis endpoints; each endpoint
/// requires its own threshold field(s).
#[derive(Debug, Deserialize)]
pub struct CommunityBody {
    pub dataset_id: Option<String>,
    pub propagation_model: Option<String>,
    pub probability_model: Option<String>,
    pub k_core: Option<u32>,
    pub l_core: Option<u32>,
    pub k_truss: Option<u32>,
    pub seed_budget: Option<u32>,
    pub seed_generation_mode: Option<String>,
    #[serde(default)]
    pub seed_nodes: Vec<NodeId>,
}

/// Body of `POST /api/influence/blocking-animation`.
#[derive(Debug, Deserialize)]
pub struct BlockingAnimationBody {
    pub original_result_id: Option<String>,
    pub blocked_result_id: Option<String>,
}

/// Body of `POST /api/influence/analysis/critical-paths/:result_id`.
#[derive(Debug, Deserialize)]
pub struct CriticalPathBody {
    #[serde(rename = "type")]
    pub analysis_type: Option<String>,
}

/// Body of `POST /api/influence/calculate-from-nodes`.
#[derive(Debug, Deserialize)]
pub struct CalculateFromNodesBody {
    pub dataset_id: Option<String>,
    pub propagation_model: Option<String>,
    pub probability_model: Option<String>,
    #[serde(default)]
    pub seed_nodes: Vec<NodeId>,
    #[serde(default)]
    pub blocking_nodes: Vec<NodeId>,
}

// ─────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────

/// Run responses keep the engine result's wire shape, which differs per
/// mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RunResponse {
    Maximization(MaximizationResult),
    Minimization(MinimizationResult),
}

/// Final influence expectation, echoing the identifier it was resolved
/// under.
#[derive(Debug, Serialize)]
pub struct FinalStateResponse {
    pub result_id: String,
    pub total_influence: f64,
    pub final_states: Vec<NodeState>,
}

/// Truncated stepped animation. `total_steps` counts kept steps; the `step`
/// indices inside are the engine's originals.
#[derive(Debug, Serialize)]
pub struct StepAnimationResponse {
    pub result_id: String,
    pub total_steps: u32,
    pub simulation_steps: Vec<SimulationStep>,
}

// ─────────────────────────────────────────────
// Validation helpers
// ─────────────────────────────────────────────

fn require_str(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::missing(field)),
    }
}

fn parse_seed_mode(token: Option<String>) -> Result<SeedMode, ApiError> {
    match token {
        None => Ok(SeedMode::default()),
        Some(t) => SeedMode::parse(&t).ok_or_else(|| {
            ApiError::Validation(format!(
                "invalid seed_generation_mode '{t}'; expected 'RANDOM' or 'IMM'"
            ))
        }),
    }
}

// ─────────────────────────────────────────────
// Translator
// ─────────────────────────────────────────────

/// Validates requests, dispatches engine calls, and owns the session store.
pub struct Translator {
    engine: Arc<dyn InfluenceEngine>,
    sessions: Arc<dyn SessionStore>,
}

impl Translator {
    pub fn new(engine: Arc<dyn InfluenceEngine>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { engine, sessions }
    }

    /// Live snapshot count, surfaced on `/api/stats`.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn resolve(&self, result_id: &str) -> Result<Snapshot, ApiError> {
        self.sessions.get(result_id).ok_or(ApiError::NotFound)
    }

    /// Maximization or minimization run, dispatched on the body's mode.
    pub async fn run(&self, body: RunBody) -> Result<RunResponse, ApiError> {
        let mode = RunMode::parse(&require_str(body.mode, "mode")?)?;
        let dataset_id = require_str(body.dataset_id, "dataset_id")?;
        let p = body.params;
        let propagation_model = require_str(p.propagation_model, "propagation_model")?;
        let probability_model = require_str(p.probability_model, "probability_model")?;
        let budget = match p.budget {
            Some(b) if b > 0 => b,
            Some(_) => return Err(ApiError::Validation("budget must be at least 1".into())),
            None => return Err(ApiError::missing("budget")),
        };
        let seed_generation_mode = parse_seed_mode(p.seed_generation_mode)?;

        let request = RunRequest {
            dataset_id: dataset_id.clone(),
            propagation_model: propagation_model.clone(),
            probability_model: probability_model.clone(),
            budget,
            seed_nodes: p.seed_nodes,
            neg_num: p.neg_num.unwrap_or(DEFAULT_NEG_NUM),
            seed_generation_mode,
        };

        match mode {
            RunMode::Maximization => {
                tracing::info!(%dataset_id, budget, "running influence maximization");
                let result = self.engine.run_maximization(&request).await?;

                // Cache the engine-resolved seeds, not the request's list.
                let resolved: Vec<NodeId> = result.seed_nodes.iter().map(|n| n.id).collect();
                self.sessions.put(
                    result.result_id.clone(),
                    Snapshot::new(dataset_id, propagation_model, probability_model, resolved),
                );
                Ok(RunResponse::Maximization(result))
            }
            RunMode::Minimization => {
                tracing::info!(%dataset_id, budget, "running influence minimization");
                let result = self.engine.run_minimization(&request).await?;

                let blocking: Vec<NodeId> = result.blocking_nodes.iter().map(|n| n.id).collect();
                let before = Snapshot::new(
                    dataset_id,
                    propagation_model,
                    probability_model,
                    result.seed_nodes.clone(),
                );
                let after = before.clone().blocked(blocking);
                self.sessions.put(result.original_result_id.clone(), before);
                self.sessions.put(result.blocked_result_id.clone(), after);
                Ok(RunResponse::Minimization(result))
            }
        }
    }

    /// Final-state lookup by result id.
    pub async fn final_state(&self, result_id: &str) -> Result<FinalStateResponse, ApiError> {
        let snapshot = self.resolve(result_id)?;
        let result = self.engine.final_influence(&query_for(snapshot)).await?;
        Ok(FinalStateResponse {
            result_id: result_id.to_string(),
            total_influence: result.total_influence,
            final_states: result.final_states,
        })
    }

    /// Stepped animation by result id, truncated to its convergent prefix.
    pub async fn step_animation(&self, result_id: &str) -> Result<StepAnimationResponse, ApiError> {
        let snapshot = self.resolve(result_id)?;
        let result = self.engine.stepped_simulation(&query_for(snapshot)).await?;

        let raw = result.simulation_steps.len();
        let kept = truncate::convergent_prefix(result.simulation_steps);
        tracing::debug!(result_id, raw, kept = kept.len(), "stepped animation resolved");

        Ok(StepAnimationResponse {
            result_id: result_id.to_string(),
            total_steps: kept.len() as u32,
            simulation_steps: kept,
        })
    }

    /// Before/after blocking animation across a minimization pair.
    ///
    /// The engine's raw step sequence is returned untruncated: oscillation
    /// under blocking carries recovery events and is semantically
    /// meaningful, not an artifact.
    pub async fn blocking_animation(
        &self,
        body: BlockingAnimationBody,
    ) -> Result<BlockingAnimationResult, ApiError> {
        let original_id = require_str(body.original_result_id, "original_result_id")?;
        let blocked_id = require_str(body.blocked_result_id, "blocked_result_id")?;

        let original = self.resolve(&original_id)?;
        let blocked = self.resolve(&blocked_id)?;

        let query = InfluenceQuery {
            dataset_id: original.dataset_id,
            propagation_model: original.propagation_model,
            probability_model: original.probability_model,
            initial_nodes: original.initial_nodes,
            blocking_nodes: blocked.blocking_nodes,
        };
        Ok(self.engine.blocking_animation(&query).await?)
    }

    /// (k,l)-core community analysis from scratch.
    pub async fn kl_core_analysis(
        &self,
        body: CommunityBody,
    ) -> Result<CommunityAnalysisResult, ApiError> {
        let k_core = body.k_core.ok_or_else(|| ApiError::missing("k_core"))?;
        let l_core = body.l_core.ok_or_else(|| ApiError::missing("l_core"))?;
        self.community_analysis(body, CommunityKind::KlCore { k_core, l_core })
            .await
    }

    /// k-core community analysis from scratch.
    pub async fn k_core_analysis(
        &self,
        body: CommunityBody,
    ) -> Result<CommunityAnalysisResult, ApiError> {
        let k_core = body.k_core.ok_or_else(|| ApiError::missing("k_core"))?;
        self.community_analysis(body, CommunityKind::KCore { k_core })
            .await
    }

    /// k-truss community analysis from scratch. A truss needs at least two
    /// common neighbours per edge, so `k_truss < 2` is rejected.
    pub async fn k_truss_analysis(
        &self,
        body: CommunityBody,
    ) -> Result<CommunityAnalysisResult, ApiError> {
        let k_truss = body.k_truss.ok_or_else(|| ApiError::missing("k_truss"))?;
        if k_truss < 2 {
            return Err(ApiError::Validation("k_truss must be at least 2".into()));
        }
        self.community_analysis(body, CommunityKind::KTruss { k_truss })
            .await
    }

    async fn community_analysis(
        &self,
        body: CommunityBody,
        kind: CommunityKind,
    ) -> Result<CommunityAnalysisResult, ApiError> {
        let dataset_id = require_str(body.dataset_id, "dataset_id")?;
        let propagation_model = require_str(body.propagation_model, "propagation_model")?;
        let probability_model = require_str(body.probability_model, "probability_model")?;
        let seed_generation_mode = parse_seed_mode(body.seed_generation_mode)?;

        let request = CommunityRequest {
            dataset_id: dataset_id.clone(),
            propagation_model: propagation_model.clone(),
            probability_model: probability_model.clone(),
            kind,
            seed_budget: body.seed_budget.unwrap_or(DEFAULT_SEED_BUDGET),
            seed_generation_mode,
            seed_nodes: body.seed_nodes,
        };

        tracing::info!(%dataset_id, ?kind, "running community analysis");
        let result = self.engine.community_from_scratch(&request).await?;

        self.sessions.put(
            result.result_id.clone(),
            Snapshot::new(
                dataset_id,
                propagation_model,
                probability_model,
                result.seed_nodes.clone(),
            ),
        );
        Ok(result)
    }

    /// Critical-path extraction for a finished computation.
    pub async fn critical_paths(
        &self,
        result_id: &str,
        body: CriticalPathBody,
    ) -> Result<CriticalPathResult, ApiError> {
        let snapshot = self.resolve(result_id)?;
        let selection = PathSelection::parse(
            body.analysis_type
                .as_deref()
                .ok_or_else(|| ApiError::missing("type"))?,
        )?;
        tracing::debug!(result_id, selection = selection.as_str(), "extracting critical paths");

        let query = CriticalPathQuery {
            result_id: result_id.to_string(),
            dataset_id: snapshot.dataset_id,
            propagation_model: snapshot.propagation_model,
            probability_model: snapshot.probability_model,
            initial_nodes: snapshot.initial_nodes,
        };
        Ok(self.engine.critical_paths(&query).await?)
    }

    /// Session-free what-if evaluation from explicit seed/blocking lists.
    ///
    /// Deliberately bypasses the session store and answers under a fixed
    /// sentinel identifier.
    pub async fn calculate_from_nodes(
        &self,
        body: CalculateFromNodesBody,
    ) -> Result<FinalStateResponse, ApiError> {
        let query = InfluenceQuery {
            dataset_id: require_str(body.dataset_id, "dataset_id")?,
            propagation_model: require_str(body.propagation_model, "propagation_model")?,
            probability_model: require_str(body.probability_model, "probability_model")?,
            initial_nodes: body.seed_nodes,
            blocking_nodes: body.blocking_nodes,
        };

        let result = self.engine.final_influence(&query).await?;
        Ok(FinalStateResponse {
            result_id: INTERACTIVE_RESULT_ID.to_string(),
            total_influence: result.total_influence,
            final_states: result.final_states,
        })
    }
}

/// Replay query for a snapshot: the recorded parameters, nothing from the
/// current request.
fn query_for(snapshot: Snapshot) -> InfluenceQuery {
    InfluenceQuery {
        dataset_id: snapshot.dataset_id,
        propagation_model: snapshot.propagation_model,
        probability_model: snapshot.probability_model,
        initial_nodes: snapshot.initial_nodes,
        blocking_nodes: snapshot.blocking_nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_rejects_unknown_token() {
        let err = RunMode::parse("community").unwrap_err();
        assert!(err.to_string().contains("community"));
    }

    #[test]
    fn path_selection_accepts_only_deepest() {
        assert_eq!(PathSelection::parse("deepest").unwrap(), PathSelection::Deepest);
        assert!(PathSelection::parse("widest").is_err());
    }

    #[test]
    fn seed_mode_defaults_to_random() {
        assert_eq!(parse_seed_mode(None).unwrap(), SeedMode::Random);
        assert_eq!(parse_seed_mode(Some("IMM".into())).unwrap(), SeedMode::Imm);
        assert!(parse_seed_mode(Some("greedy".into())).is_err());
    }

    #[test]
    fn require_str_rejects_blank() {
        assert!(require_str(Some("  ".into()), "dataset_id").is_err());
        assert!(require_str(None, "dataset_id").is_err());
        assert_eq!(require_str(Some("karate".into()), "dataset_id").unwrap(), "karate");
    }
}
