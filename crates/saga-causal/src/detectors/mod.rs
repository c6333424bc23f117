//! Heuristic implementations of the detector, resolver and answer-matcher
//! traits. Deterministic, so they double as test strategies.

pub mod answer;
pub mod keyword;
pub mod roster;

pub use answer::YesNoAnswerMatcher;
pub use keyword::{KeywordCauseDetector, KeywordEffectDetector, KeywordRule};
pub use roster::RosterActorResolver;
