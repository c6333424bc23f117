use super::{CausalError, ConfigError, DetectionError, TranscriptError};

/// Top-level error for the Saga engine.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SagaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Causal error: {0}")]
    Causal(#[from] CausalError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type SagaResult<T> = Result<T, SagaError>;
