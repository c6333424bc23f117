use serde::{Deserialize, Serialize};

/// Which scan discovered a pairing. Only used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Scanning forward from the cause. Sorts before `Backward`.
    Forward,
    /// Scanning backward from the effect.
    Backward,
}

/// A scored cause→effect pairing. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCandidate {
    pub cause_index: usize,
    pub effect_index: usize,
    pub direction: Direction,
    /// `effect_index - cause_index`, at least 1.
    pub distance: usize,
    pub distance_score: f64,
    pub lexical_score: f64,
    pub answer_boost: f64,
    pub strength_ce: f64,
}
