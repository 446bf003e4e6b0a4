use cascade_engine::NodeId;

/// Immutable record of the parameters that produced one engine result.
///
/// Invariant: `initial_nodes` is always the engine's *resolved* seed set,
/// never the client's raw request — the engine may generate seeds itself
/// when the client supplies none, and follow-up queries must replay the run
/// the user was actually shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub dataset_id: String,
    pub propagation_model: String,
    pub probability_model: String,
    pub initial_nodes: Vec<NodeId>,
    /// Empty for maximization and community snapshots; populated for the
    /// blocked half of a minimization pair.
    pub blocking_nodes: Vec<NodeId>,
}

impl Snapshot {
    /// Snapshot of an unblocked computation.
    pub fn new(
        dataset_id: impl Into<String>,
        propagation_model: impl Into<String>,
        probability_model: impl Into<String>,
        initial_nodes: Vec<NodeId>,
    ) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            propagation_model: propagation_model.into(),
            probability_model: probability_model.into(),
            initial_nodes,
            blocking_nodes: Vec::new(),
        }
    }

    /// The blocked half of a minimization pair: same dataset, models, and
    /// resolved seeds, plus the blocking set.
    pub fn blocked(mut self, blocking_nodes: Vec<NodeId>) -> Self {
        self.blocking_nodes = blocking_nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_differs_only_in_blocking_nodes() {
        let before = Snapshot::new("karate", "IC", "WC", vec![1, 2, 3]);
        let after = before.clone().blocked(vec![9, 10]);

        assert_eq!(before.dataset_id, after.dataset_id);
        assert_eq!(before.propagation_model, after.propagation_model);
        assert_eq!(before.probability_model, after.probability_model);
        assert_eq!(before.initial_nodes, after.initial_nodes);
        assert!(before.blocking_nodes.is_empty());
        assert_eq!(after.blocking_nodes, vec![9, 10]);
    }
}
