//! Data model shared by every stage of the engine.

pub mod candidate;
pub mod detection;
pub mod eligibility;
pub mod node;
pub mod tier;
pub mod trace;
pub mod transcript;

pub use candidate::{Direction, EdgeCandidate};
pub use detection::{Actor, CauseDetection, EffectDetection};
pub use eligibility::{EligibilityMask, ExcludedRange};
pub use node::{CauseSide, EffectSide, GraphNode, JoinInfo, NodeKind, LEAF_LEVEL};
pub use tier::Tier;
pub use trace::{AllocationReason, AllocationTraceEntry, MassDelta, NeighborEdgeTrace};
pub use transcript::TranscriptLine;
