//! Edge allocation: global greedy one-to-one matching of candidates, then
//! materialization of leaf nodes.
//!
//! Claim state is explicit: two sets threaded through the sweep and returned
//! with the outcome, never ambient.

use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};
use saga_core::config::TierThresholds;
use saga_core::models::{
    AllocationReason, AllocationTraceEntry, CauseSide, EdgeCandidate, EffectSide, GraphNode,
};
use tracing::debug;

use crate::detection::DetectedLine;

/// Causes and effects already claimed by an accepted candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimState {
    pub claimed_causes: FxHashSet<usize>,
    pub claimed_effects: FxHashSet<usize>,
}

impl ClaimState {
    pub fn is_free(&self, candidate: &EdgeCandidate) -> bool {
        !self.claimed_causes.contains(&candidate.cause_index)
            && !self.claimed_effects.contains(&candidate.effect_index)
    }

    fn claim(&mut self, candidate: &EdgeCandidate) {
        self.claimed_causes.insert(candidate.cause_index);
        self.claimed_effects.insert(candidate.effect_index);
    }
}

/// Result of one allocation pass.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// One leaf per detected cause, in increasing cause index.
    pub nodes: Vec<GraphNode>,
    /// Detected effects no cause claimed, in increasing index.
    pub unclaimed_effects: Vec<usize>,
    pub trace: Vec<AllocationTraceEntry>,
    pub claims: ClaimState,
}

/// Total order used by the sweep: strength desc, distance asc, cause asc,
/// effect asc, forward before backward.
pub fn compare_candidates(a: &EdgeCandidate, b: &EdgeCandidate) -> Ordering {
    b.strength_ce
        .total_cmp(&a.strength_ce)
        .then_with(|| a.distance.cmp(&b.distance))
        .then_with(|| a.cause_index.cmp(&b.cause_index))
        .then_with(|| a.effect_index.cmp(&b.effect_index))
        .then_with(|| a.direction.cmp(&b.direction))
}

/// Walk `sorted` and accept every candidate whose cause and effect are both
/// still free. Returns the accepted candidates in acceptance order.
pub fn greedy_sweep<'c>(sorted: &'c [EdgeCandidate], state: &mut ClaimState) -> Vec<&'c EdgeCandidate> {
    let mut accepted = Vec::new();
    for candidate in sorted {
        if state.is_free(candidate) {
            state.claim(candidate);
            accepted.push(candidate);
        }
    }
    accepted
}

/// Resolve the candidate pool into leaves.
///
/// `detected` must be the eligible lines in transcript order, as returned by
/// [`crate::detection::detect_lines`].
pub fn allocate(
    detected: &[DetectedLine],
    mut candidates: Vec<EdgeCandidate>,
    tiers: &TierThresholds,
) -> AllocationOutcome {
    candidates.sort_by(compare_candidates);

    let mut claims = ClaimState::default();
    let accepted: FxHashMap<usize, &EdgeCandidate> = greedy_sweep(&candidates, &mut claims)
        .into_iter()
        .map(|c| (c.cause_index, c))
        .collect();

    let by_index: FxHashMap<usize, &DetectedLine> =
        detected.iter().map(|l| (l.index, l)).collect();

    let mut considered: FxHashMap<usize, Vec<EdgeCandidate>> = FxHashMap::default();
    for candidate in &candidates {
        considered
            .entry(candidate.cause_index)
            .or_default()
            .push(candidate.clone());
    }

    let mut nodes = Vec::new();
    let mut trace = Vec::new();

    for line in detected {
        let Some((detection, actor)) = &line.cause else {
            continue;
        };
        let cause = CauseSide {
            text: line.text.clone(),
            cause_type: detection.cause_type.clone(),
            anchor_index: line.index,
            mass: detection.mass,
            actor: actor.clone(),
        };
        let considered = considered.remove(&line.index).unwrap_or_default();

        let winner = accepted
            .get(&line.index)
            .and_then(|c| by_index.get(&c.effect_index).map(|effect_line| (*c, *effect_line)));

        match winner {
            Some((candidate, effect_line)) => {
                let (effect_type, effect_mass) = effect_line
                    .effect
                    .as_ref()
                    .map(|e| (e.effect_type.clone(), e.mass))
                    .unwrap_or_default();
                let effect = EffectSide {
                    text: effect_line.text.clone(),
                    effect_type,
                    anchor_index: effect_line.index,
                    mass: effect_mass,
                    distance: candidate.distance,
                    score: candidate.strength_ce,
                };
                let context = context_between(detected, line.index, effect_line.index);
                trace.push(AllocationTraceEntry {
                    cause_index: line.index,
                    considered,
                    chosen_effect: Some(effect_line.index),
                    reason: AllocationReason::EdgeGreedyOneToOne,
                });
                nodes.push(GraphNode::link(cause, effect, context, tiers));
            }
            None => {
                let reason = if considered.is_empty() {
                    AllocationReason::NoCandidate
                } else {
                    AllocationReason::EffectsExhausted
                };
                debug!(cause = line.index, reason = reason.as_str(), "cause left unclaimed");
                trace.push(AllocationTraceEntry {
                    cause_index: line.index,
                    considered,
                    chosen_effect: None,
                    reason,
                });
                nodes.push(GraphNode::singleton(cause, tiers));
            }
        }
    }

    let unclaimed_effects = detected
        .iter()
        .filter(|l| l.is_effect() && !claims.claimed_effects.contains(&l.index))
        .map(|l| l.index)
        .collect();

    AllocationOutcome {
        nodes,
        unclaimed_effects,
        trace,
        claims,
    }
}

/// Text of eligible lines strictly between `from` and `to`.
fn context_between(detected: &[DetectedLine], from: usize, to: usize) -> String {
    let start = detected.partition_point(|l| l.index <= from);
    let end = detected.partition_point(|l| l.index < to);
    if start >= end {
        return String::new();
    }
    detected[start..end]
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
