//! # cascade-engine
//!
//! Call contract for the external graph-influence computation engine.
//!
//! The engine owns all hard algorithmic work — influence
//! maximization/minimization, (k,l)-core / k-core / k-truss community
//! discovery, stochastic diffusion simulation, and critical-path
//! extraction. This crate only describes how to talk to it:
//!
//! - [`model`]    — typed request / result structs matching the engine wire
//!   format
//! - [`contract::InfluenceEngine`] — the trait every backend implements
//! - [`remote::RemoteEngine`]      — HTTP-JSON backend (the shipped one)
//! - [`error::EngineError`]        — failure taxonomy for engine calls
//!
//! Every call is single-shot: no retry, no timeout, no cancellation. A
//! failure is surfaced to the caller as-is.

pub mod contract;
pub mod error;
pub mod model;
pub mod remote;

pub use contract::InfluenceEngine;
pub use error::EngineError;
pub use model::{
    BlockingAnimationResult, CommunityAnalysisResult, CommunityKind, CommunityRequest,
    Community, CriticalPath, CriticalPathQuery, CriticalPathResult, FinalInfluenceResult,
    InfluenceEstimate, InfluenceQuery, MaximizationResult, MinimizationResult, NodeId,
    NodeState, PathEdge, RankedNode, RunRequest, SeedMode, SimulationResult, SimulationStep,
};
pub use remote::RemoteEngine;
