use serde::{Deserialize, Serialize};

use super::TranscriptLine;
use crate::errors::TranscriptError;

/// An inclusive range of absolute transcript indices excluded upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRange {
    pub start: usize,
    pub end: usize,
    /// Why the range was excluded (e.g. "ooc", "combat"). Never inspected by the engine.
    pub reason: String,
}

impl ExcludedRange {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Per-line inclusion flags, positionally aligned with the transcript slice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EligibilityMask {
    pub eligible: Vec<bool>,
    #[serde(default)]
    pub excluded_ranges: Vec<ExcludedRange>,
}

impl EligibilityMask {
    /// Mask with every one of `len` lines eligible.
    pub fn all_eligible(len: usize) -> Self {
        Self {
            eligible: vec![true; len],
            excluded_ranges: Vec::new(),
        }
    }

    /// Build a mask from excluded ranges over absolute indices.
    pub fn from_excluded_ranges(
        lines: &[TranscriptLine],
        ranges: Vec<ExcludedRange>,
    ) -> Result<Self, TranscriptError> {
        if let Some(bad) = ranges.iter().find(|r| r.start > r.end) {
            return Err(TranscriptError::InvalidExcludedRange {
                start: bad.start,
                end: bad.end,
            });
        }
        let eligible = lines
            .iter()
            .map(|line| !ranges.iter().any(|r| r.contains(line.index)))
            .collect();
        Ok(Self {
            eligible,
            excluded_ranges: ranges,
        })
    }

    /// Whether the line at `position` in the transcript slice is eligible.
    pub fn is_eligible(&self, position: usize) -> bool {
        self.eligible.get(position).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.eligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible.iter().filter(|&&e| e).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_exclude_inclusive_bounds() {
        let lines: Vec<TranscriptLine> = (10..16)
            .map(|i| TranscriptLine::new(i, "gm", "text"))
            .collect();
        let mask = EligibilityMask::from_excluded_ranges(
            &lines,
            vec![ExcludedRange {
                start: 11,
                end: 13,
                reason: "ooc".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(mask.eligible, vec![true, false, false, false, true, true]);
        assert_eq!(mask.eligible_count(), 3);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let lines = vec![TranscriptLine::new(0, "gm", "text")];
        let err = EligibilityMask::from_excluded_ranges(
            &lines,
            vec![ExcludedRange {
                start: 5,
                end: 2,
                reason: "combat".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::InvalidExcludedRange { start: 5, end: 2 }
        ));
    }

    #[test]
    fn out_of_bounds_position_is_ineligible() {
        let mask = EligibilityMask::all_eligible(2);
        assert!(mask.is_eligible(1));
        assert!(!mask.is_eligible(2));
    }
}
