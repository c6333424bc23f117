use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of a session transcript. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Absolute position in the session log. Unique and strictly increasing.
    pub index: usize,
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptLine {
    pub fn new(index: usize, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            speaker: speaker.into(),
            text: text.into(),
            timestamp: None,
        }
    }
}
