//! Errors surfaced at the detector boundary.

/// A detector could not produce a usable result. The engine never guesses a
/// detection in place of a failed one.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("detector {detector} unavailable: {reason}")]
    Unavailable { detector: String, reason: String },

    #[error("detection failed for line {index}: {source}")]
    AtLine {
        index: usize,
        #[source]
        source: Box<DetectionError>,
    },

    #[error("detection mass {mass} for line {index} is outside [0, 1]")]
    MassOutOfRange { index: usize, mass: f64 },
}

impl DetectionError {
    /// Attach the absolute transcript index of the line being classified.
    pub fn at_line(self, index: usize) -> Self {
        match self {
            Self::AtLine { .. } | Self::MassOutOfRange { .. } => self,
            other => Self::AtLine {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Index of the failing line, when known.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            Self::AtLine { index, .. } | Self::MassOutOfRange { index, .. } => Some(*index),
            Self::Unavailable { .. } => None,
        }
    }
}
