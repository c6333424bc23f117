//! Injected strategies. The engine is written against these, never against
//! a concrete classifier.

pub mod actor_resolver;
pub mod answer_matcher;
pub mod detector;

pub use actor_resolver::IActorResolver;
pub use answer_matcher::{IAnswerMatcher, NoAnswerMatcher};
pub use detector::{ICauseDetector, IEffectDetector};
