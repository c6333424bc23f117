//! Diagnostic records: allocation decisions, neighbor contributions, mass deltas.

use serde::{Deserialize, Serialize};

use super::{EdgeCandidate, Tier};

/// One neighbor's contribution to a node's boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborEdgeTrace {
    pub from_id: String,
    pub to_id: String,
    pub strength_ll: f64,
    pub contrib: f64,
    pub distance: f64,
    pub lexical: f64,
}

/// Why a cause ended up linked or alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationReason {
    /// Won its effect in the greedy one-to-one sweep.
    EdgeGreedyOneToOne,
    /// No eligible effect within the scan window.
    NoCandidate,
    /// Had candidates, but every one of their effects was claimed first.
    EffectsExhausted,
}

impl AllocationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EdgeGreedyOneToOne => "edge_greedy_one_to_one",
            Self::NoCandidate => "no_candidate",
            Self::EffectsExhausted => "effects_exhausted",
        }
    }
}

/// Allocation audit record for one cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationTraceEntry {
    pub cause_index: usize,
    /// Every candidate involving this cause, in global sort order.
    pub considered: Vec<EdgeCandidate>,
    pub chosen_effect: Option<usize>,
    pub reason: AllocationReason,
}

/// Per-node record of one anneal pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassDelta {
    pub link_id: String,
    pub mass_base: f64,
    pub mass_prev: f64,
    pub mass_new: f64,
    pub boost: f64,
    pub tier_prev: Tier,
    pub tier_new: Tier,
    pub top_contributor_id: Option<String>,
}
