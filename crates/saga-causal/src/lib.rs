//! # saga-causal
//!
//! The causal hierarchy engine. Scores cause→effect candidates in a transcript,
//! allocates them one-to-one into leaf links, reinforces nearby links through
//! mass annealing, and composes them round by round into beats, events and scenes.

pub mod allocation;
pub mod anneal;
pub mod candidates;
pub mod detection;
pub mod detectors;
pub mod engine;
pub mod hierarchy;
pub mod result;
pub mod scoring;

pub use allocation::{allocate, AllocationOutcome, ClaimState};
pub use anneal::{AnnealReport, Annealer};
pub use candidates::CandidateGenerator;
pub use detection::DetectedLine;
pub use detectors::{KeywordCauseDetector, KeywordEffectDetector, RosterActorResolver, YesNoAnswerMatcher};
pub use engine::CausalHierarchyEngine;
pub use hierarchy::{Composer, HierarchyGraph};
pub use result::{HierarchyResult, RoundSnapshot, RoundSummary, RunSummary};
