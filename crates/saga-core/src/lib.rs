//! # saga-core
//!
//! Foundation crate for the Saga causal hierarchy engine.
//! Defines the data model, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::{SagaError, SagaResult};
pub use models::{EligibilityMask, GraphNode, NodeKind, Tier, TranscriptLine};
