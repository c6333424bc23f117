use crate::errors::DetectionError;
use crate::models::{CauseDetection, EffectDetection};

/// Classifies a line as a cause. Implementations must be pure: the same text
/// always yields the same detection.
pub trait ICauseDetector: Send + Sync {
    fn detect_cause(&self, text: &str) -> Result<CauseDetection, DetectionError>;

    /// Name used in diagnostics.
    fn name(&self) -> &str;
}

/// Classifies a line as an effect.
pub trait IEffectDetector: Send + Sync {
    fn detect_effect(&self, text: &str) -> Result<EffectDetection, DetectionError>;

    fn name(&self) -> &str;
}
