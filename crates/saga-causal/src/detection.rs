//! Input validation and per-line detection through the injected strategies.

use saga_core::errors::{DetectionError, SagaResult, TranscriptError};
use saga_core::models::{Actor, CauseDetection, EffectDetection, EligibilityMask, TranscriptLine};
use saga_core::traits::{IActorResolver, ICauseDetector, IEffectDetector};
use tracing::debug;

/// An eligible transcript line with its detections.
#[derive(Debug, Clone)]
pub struct DetectedLine {
    /// Position in the transcript slice.
    pub position: usize,
    /// Absolute transcript index.
    pub index: usize,
    pub text: String,
    pub cause: Option<(CauseDetection, Actor)>,
    pub effect: Option<EffectDetection>,
}

impl DetectedLine {
    pub fn is_cause(&self) -> bool {
        self.cause.is_some()
    }

    pub fn is_effect(&self) -> bool {
        self.effect.is_some()
    }
}

/// Fail fast on contract violations: indices must strictly increase and the
/// mask must cover exactly the transcript.
pub fn validate_inputs(lines: &[TranscriptLine], mask: &EligibilityMask) -> Result<(), TranscriptError> {
    if mask.len() != lines.len() {
        return Err(TranscriptError::MaskLengthMismatch {
            lines: lines.len(),
            mask: mask.len(),
        });
    }
    for (position, pair) in lines.windows(2).enumerate() {
        if pair[1].index <= pair[0].index {
            return Err(TranscriptError::NonMonotonicIndex {
                position: position + 1,
                previous: pair[0].index,
                index: pair[1].index,
            });
        }
    }
    if let Some(bad) = mask.excluded_ranges.iter().find(|r| r.start > r.end) {
        return Err(TranscriptError::InvalidExcludedRange {
            start: bad.start,
            end: bad.end,
        });
    }
    Ok(())
}

/// Run the detectors over every eligible line, in transcript order.
///
/// A line is a cause iff the cause detector fires *and* its speaker resolves
/// to an actor. Ineligible lines are skipped entirely.
pub fn detect_lines(
    lines: &[TranscriptLine],
    mask: &EligibilityMask,
    cause_detector: &dyn ICauseDetector,
    effect_detector: &dyn IEffectDetector,
    actor_resolver: &dyn IActorResolver,
) -> SagaResult<Vec<DetectedLine>> {
    let mut detected = Vec::with_capacity(mask.eligible_count());

    for (position, line) in lines.iter().enumerate() {
        if !mask.is_eligible(position) {
            continue;
        }

        let cause_detection = cause_detector
            .detect_cause(&line.text)
            .map_err(|e| e.at_line(line.index))?;
        let cause = if cause_detection.is_cause {
            check_mass(line.index, cause_detection.mass)?;
            match actor_resolver.resolve(&line.speaker) {
                Some(actor) => Some((cause_detection, actor)),
                None => {
                    debug!(
                        index = line.index,
                        speaker = %line.speaker,
                        "cause dropped: speaker did not resolve"
                    );
                    None
                }
            }
        } else {
            None
        };

        let effect_detection = effect_detector
            .detect_effect(&line.text)
            .map_err(|e| e.at_line(line.index))?;
        let effect = if effect_detection.is_effect {
            check_mass(line.index, effect_detection.mass)?;
            Some(effect_detection)
        } else {
            None
        };

        detected.push(DetectedLine {
            position,
            index: line.index,
            text: line.text.clone(),
            cause,
            effect,
        });
    }

    Ok(detected)
}

fn check_mass(index: usize, mass: f64) -> Result<(), DetectionError> {
    if (0.0..=1.0).contains(&mass) {
        Ok(())
    } else {
        Err(DetectionError::MassOutOfRange { index, mass })
    }
}
