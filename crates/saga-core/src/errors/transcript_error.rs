//! Input contract violations on the transcript and its eligibility mask.

/// Raised before any scoring begins. Inputs are never truncated or padded.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcript indices must strictly increase: position {position} has index {index} after {previous}")]
    NonMonotonicIndex {
        position: usize,
        previous: usize,
        index: usize,
    },

    #[error("eligibility mask covers {mask} lines but the transcript has {lines}")]
    MaskLengthMismatch { lines: usize, mask: usize },

    #[error("excluded range is inverted: start {start} > end {end}")]
    InvalidExcludedRange { start: usize, end: usize },
}
