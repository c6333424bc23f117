//! Error handling for Saga.
//! One error enum per subsystem, `thiserror` only.

pub mod causal_error;
pub mod config_error;
pub mod detection_error;
pub mod saga_error;
pub mod transcript_error;

pub use causal_error::CausalError;
pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use saga_error::{SagaError, SagaResult};
pub use transcript_error::TranscriptError;
