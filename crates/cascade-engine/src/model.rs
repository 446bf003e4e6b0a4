use serde::{Deserialize, Serialize};

/// Node identifier in the engine's dataset domain.
///
/// The engine addresses nodes by dense integer ids; this layer never
/// interprets them beyond equality.
pub type NodeId = u64;

// ─────────────────────────────────────────────
// Shared value types
// ─────────────────────────────────────────────

/// Influence estimate as an absolute activated-node count plus the ratio of
/// the whole graph it represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEstimate {
    pub count: u64,
    pub ratio: f64,
}

/// One directed propagation edge reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
    pub source: NodeId,
    pub target: NodeId,
}

/// A node together with its selection priority (seed rank or blocking rank).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: NodeId,
    pub priority: f64,
}

/// Per-node state at a point of the simulation.
///
/// `state` comes from the engine's small fixed vocabulary (e.g. `"active"`,
/// `"inactive"`) and is treated as opaque except for equality against the
/// `"active"` literal. `probability` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: NodeId,
    pub state: String,
    pub probability: f64,
}

/// One time step of a stepped diffusion simulation.
///
/// `newly_recovered_nodes` is only populated by the blocking-animation
/// query; plain stepped simulations omit it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub step: u32,
    pub newly_activated_nodes: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub newly_recovered_nodes: Vec<NodeId>,
    pub node_states: Vec<NodeState>,
}

// ─────────────────────────────────────────────
// Seed generation
// ─────────────────────────────────────────────

/// How the engine resolves seed nodes when the client supplies none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeedMode {
    /// Uniform random seed selection (engine default).
    #[default]
    Random,
    /// Influence-maximization-driven seed selection.
    Imm,
}

impl SeedMode {
    /// Parse a wire token. Returns `None` for anything outside the closed
    /// vocabulary so the caller can name the offending value.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "RANDOM" => Some(Self::Random),
            "IMM" => Some(Self::Imm),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────

/// Parameters for a maximization or minimization run.
///
/// `seed_nodes` is the client's manual seed list; an empty list is a legal
/// trigger for engine-side seed generation in `seed_generation_mode`. The
/// engine's result always carries the seed list it actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub dataset_id: String,
    pub propagation_model: String,
    pub probability_model: String,
    pub budget: u32,
    pub seed_nodes: Vec<NodeId>,
    pub neg_num: u32,
    pub seed_generation_mode: SeedMode,
}

/// Inputs shared by the final-influence, stepped-simulation, and
/// blocking-animation queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceQuery {
    pub dataset_id: String,
    pub propagation_model: String,
    pub probability_model: String,
    pub initial_nodes: Vec<NodeId>,
    pub blocking_nodes: Vec<NodeId>,
}

/// Cohesion criterion for community discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommunityKind {
    KlCore { k_core: u32, l_core: u32 },
    KCore { k_core: u32 },
    KTruss { k_truss: u32 },
}

/// Parameters for a from-scratch community analysis (no prior session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityRequest {
    pub dataset_id: String,
    pub propagation_model: String,
    pub probability_model: String,
    #[serde(flatten)]
    pub kind: CommunityKind,
    pub seed_budget: u32,
    pub seed_generation_mode: SeedMode,
    pub seed_nodes: Vec<NodeId>,
}

/// Parameters for a critical-path extraction over a finished computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathQuery {
    pub result_id: String,
    pub dataset_id: String,
    pub propagation_model: String,
    pub probability_model: String,
    pub initial_nodes: Vec<NodeId>,
}

// ─────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────

/// Result of an influence-maximization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaximizationResult {
    pub result_id: String,
    /// Seeds the engine actually used, ranked by priority.
    pub seed_nodes: Vec<RankedNode>,
    pub final_influence: InfluenceEstimate,
    pub message: String,
    pub main_propagation_paths: Vec<PathEdge>,
}

/// Result of an influence-minimization run.
///
/// Carries two result identifiers: `original_result_id` names the
/// unblocked baseline computation, `blocked_result_id` the run with
/// `blocking_nodes` removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizationResult {
    pub original_result_id: String,
    pub blocked_result_id: String,
    /// Seeds the engine actually used (generated when the request's list
    /// was empty).
    pub seed_nodes: Vec<NodeId>,
    pub blocking_nodes: Vec<RankedNode>,
    pub influence_before: InfluenceEstimate,
    pub influence_after: InfluenceEstimate,
    pub reduction_ratio: f64,
    pub cut_off_paths: Vec<PathEdge>,
    pub message: String,
}

/// Converged expectation of a diffusion from a fixed seed/blocking set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalInfluenceResult {
    pub total_influence: f64,
    pub final_states: Vec<NodeState>,
}

/// Raw stepped simulation as produced by the engine, untruncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub simulation_steps: Vec<SimulationStep>,
}

/// Before/after blocking animation. Unlike the plain stepped simulation,
/// steps here may include recovery events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingAnimationResult {
    pub result_id: String,
    pub total_steps: u32,
    pub simulation_steps: Vec<SimulationStep>,
}

/// The discovered community itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub node_ids: Vec<NodeId>,
    pub average_influence_prob: f64,
    pub node_count: u64,
}

/// Result of a from-scratch community analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityAnalysisResult {
    pub result_id: String,
    pub community: Community,
    pub message: String,
    pub final_states: Vec<NodeState>,
    /// Seeds the engine actually used for the influence pass.
    pub seed_nodes: Vec<NodeId>,
}

/// One critical propagation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    pub nodes: Vec<NodeId>,
    pub score: f64,
    #[serde(rename = "type")]
    pub path_type: String,
}

/// Result of a critical-path extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    pub result_id: String,
    pub critical_paths: Vec<CriticalPath>,
    pub message: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_mode_parses_closed_vocabulary() {
        assert_eq!(SeedMode::parse("RANDOM"), Some(SeedMode::Random));
        assert_eq!(SeedMode::parse("IMM"), Some(SeedMode::Imm));
        assert_eq!(SeedMode::parse("random"), None);
        assert_eq!(SeedMode::parse("GREEDY"), None);
    }

    #[test]
    fn seed_mode_serializes_as_wire_token() {
        assert_eq!(serde_json::to_string(&SeedMode::Random).unwrap(), "\"RANDOM\"");
        assert_eq!(serde_json::to_string(&SeedMode::Imm).unwrap(), "\"IMM\"");
    }

    #[test]
    fn simulation_step_tolerates_missing_recovered_list() {
        let step: SimulationStep = serde_json::from_value(serde_json::json!({
            "step": 2,
            "newly_activated_nodes": [4, 7],
            "node_states": [{"id": 4, "state": "active", "probability": 0.9}]
        }))
        .unwrap();

        assert!(step.newly_recovered_nodes.is_empty());

        // And the empty list stays off the wire on the way back out.
        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("newly_recovered_nodes").is_none());
    }

    #[test]
    fn critical_path_uses_type_field_name() {
        let path = CriticalPath {
            nodes: vec![1, 2, 3],
            score: 0.75,
            path_type: "deepest".into(),
        };
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["type"], "deepest");
    }

    #[test]
    fn community_kind_flattens_into_request() {
        let req = CommunityRequest {
            dataset_id: "karate".into(),
            propagation_model: "IC".into(),
            probability_model: "WC".into(),
            kind: CommunityKind::KlCore { k_core: 3, l_core: 2 },
            seed_budget: 10,
            seed_generation_mode: SeedMode::Random,
            seed_nodes: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["kind"], "kl_core");
        assert_eq!(json["k_core"], 3);
        assert_eq!(json["l_core"], 2);
    }
}
