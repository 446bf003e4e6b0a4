//! Convergence truncation.
//!
//! The engine's stepped simulation can, for some model/blocking
//! configurations, show the active-node count dipping before it
//! re-stabilizes. The walk-forward visualization this feeds only depicts
//! growth, so the first regression marks the end of the useful animation:
//! everything from that step on is discarded. Plateaus (equal counts) are
//! kept, and original step indices are preserved — only the sequence length
//! changes.

use cascade_engine::SimulationStep;

/// State literal counted toward the influence total.
pub const ACTIVE_STATE: &str = "active";

fn active_count(step: &SimulationStep) -> i64 {
    step.node_states
        .iter()
        .filter(|ns| ns.state == ACTIVE_STATE)
        .count() as i64
}

/// Longest prefix over which the active-node count is non-decreasing.
///
/// `max_seen` starts at -1 so a lone step always survives, whatever its
/// count. The `>=` comparison keeps plateaus; the first strict decrease
/// stops the scan without examining later steps.
pub fn convergent_prefix(steps: Vec<SimulationStep>) -> Vec<SimulationStep> {
    let mut kept = Vec::with_capacity(steps.len());
    let mut max_seen: i64 = -1;

    for step in steps {
        let active = active_count(&step);
        if active < max_seen {
            tracing::debug!(
                step = step.step,
                active,
                max_seen,
                "active count regressed, truncating animation"
            );
            break;
        }
        max_seen = active;
        kept.push(step);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_engine::NodeState;

    /// A step at `index` with exactly `active` nodes in the active state
    /// plus one inactive straggler.
    fn step_with(index: u32, active: usize) -> SimulationStep {
        let mut node_states: Vec<NodeState> = (0..active as u64)
            .map(|id| NodeState {
                id,
                state: "active".into(),
                probability: 0.8,
            })
            .collect();
        node_states.push(NodeState {
            id: 9_999,
            state: "inactive".into(),
            probability: 0.1,
        });
        SimulationStep {
            step: index,
            newly_activated_nodes: vec![],
            newly_recovered_nodes: vec![],
            node_states,
        }
    }

    fn steps(counts: &[usize]) -> Vec<SimulationStep> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| step_with(i as u32, c))
            .collect()
    }

    #[test]
    fn first_decrease_truncates_rest() {
        let kept = convergent_prefix(steps(&[3, 5, 5, 4]));
        assert_eq!(kept.len(), 3);
        assert_eq!(
            kept.iter().map(|s| s.step).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn non_decreasing_input_is_unchanged() {
        let input = steps(&[0, 1, 2, 3]);
        let kept = convergent_prefix(input.clone());
        assert_eq!(kept, input);
    }

    #[test]
    fn single_step_with_zero_actives_is_kept() {
        let kept = convergent_prefix(steps(&[0]));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(convergent_prefix(vec![]).is_empty());
    }

    #[test]
    fn plateau_is_not_a_cutoff() {
        let kept = convergent_prefix(steps(&[2, 2, 2]));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn decrease_after_plateau_still_truncates() {
        let kept = convergent_prefix(steps(&[4, 4, 3, 6]));
        // Step 3 grows again but must not be examined after the cut.
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn output_is_always_a_prefix_of_input() {
        let input = steps(&[1, 3, 2, 5, 4, 4]);
        let kept = convergent_prefix(input.clone());
        assert!(kept.len() <= input.len());
        assert_eq!(kept[..], input[..kept.len()]);
    }

    #[test]
    fn original_step_indices_are_preserved() {
        let mut input = steps(&[1, 2]);
        input[0].step = 7;
        input[1].step = 8;
        let kept = convergent_prefix(input);
        assert_eq!(kept[0].step, 7);
        assert_eq!(kept[1].step, 8);
    }

    #[test]
    fn only_active_state_counts() {
        // Larger totals but fewer "active" entries must still truncate.
        let mut a = step_with(0, 3);
        let mut b = step_with(1, 2);
        b.node_states.push(NodeState {
            id: 500,
            state: "recovered".into(),
            probability: 0.4,
        });
        b.node_states.push(NodeState {
            id: 501,
            state: "recovered".into(),
            probability: 0.4,
        });
        a.newly_activated_nodes = vec![0, 1, 2];
        let kept = convergent_prefix(vec![a, b]);
        assert_eq!(kept.len(), 1);
    }
}
