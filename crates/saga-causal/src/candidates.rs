//! Candidate generation: windowed cause→effect pairings with local scores.
//!
//! Forward scan: each cause looks at the next `k_local` eligible effects.
//! Backward scan: each effect looks at the previous `k_local` eligible causes.
//! Both scans score with
//! `strength_ce = hill(d) × (1 + beta_lex × lexical) + answer_boost`.

use std::collections::BTreeMap;

use rayon::prelude::*;
use saga_core::config::CandidateConfig;
use saga_core::constants::{MIN_DISTANCE, ROLL_EFFECT_TYPE};
use saga_core::errors::CausalError;
use saga_core::models::{Direction, EdgeCandidate};
use saga_core::traits::IAnswerMatcher;

use crate::detection::DetectedLine;
use crate::scoring::{self, TokenSet};

/// A detected cause or effect line with its token set, prepared once.
struct Endpoint<'a> {
    line: &'a DetectedLine,
    tokens: TokenSet,
}

/// Scores every windowed pairing between detected causes and effects.
pub struct CandidateGenerator<'a> {
    config: &'a CandidateConfig,
    answer_matcher: &'a dyn IAnswerMatcher,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(config: &'a CandidateConfig, answer_matcher: &'a dyn IAnswerMatcher) -> Self {
        Self {
            config,
            answer_matcher,
        }
    }

    /// Produce one candidate per `(cause_index, effect_index)` pair, ordered by
    /// that pair. When both scans find the same pair the stronger one is kept.
    pub fn generate(&self, detected: &[DetectedLine]) -> Result<Vec<EdgeCandidate>, CausalError> {
        let causes: Vec<Endpoint<'_>> = detected
            .iter()
            .filter(|l| l.is_cause())
            .map(|line| Endpoint {
                line,
                tokens: scoring::token_set(&line.text),
            })
            .collect();
        let effects: Vec<Endpoint<'_>> = detected
            .iter()
            .filter(|l| l.is_effect())
            .map(|line| Endpoint {
                line,
                tokens: scoring::token_set(&line.text),
            })
            .collect();

        let k = self.config.k_local;

        let forward: Vec<Vec<EdgeCandidate>> = causes
            .par_iter()
            .map(|cause| {
                let start = effects.partition_point(|e| e.line.index <= cause.line.index);
                effects[start..]
                    .iter()
                    .take(k)
                    .map(|effect| self.score(cause, effect, Direction::Forward))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        let backward: Vec<Vec<EdgeCandidate>> = effects
            .par_iter()
            .map(|effect| {
                let end = causes.partition_point(|c| c.line.index < effect.line.index);
                causes[..end]
                    .iter()
                    .rev()
                    .take(k)
                    .map(|cause| self.score(cause, effect, Direction::Backward))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        let mut merged: BTreeMap<(usize, usize), EdgeCandidate> = BTreeMap::new();
        for candidate in forward.into_iter().chain(backward).flatten() {
            let key = (candidate.cause_index, candidate.effect_index);
            match merged.get(&key) {
                Some(existing) if !prefer(&candidate, existing) => {}
                _ => {
                    merged.insert(key, candidate);
                }
            }
        }

        Ok(merged.into_values().collect())
    }

    fn score(
        &self,
        cause: &Endpoint<'_>,
        effect: &Endpoint<'_>,
        direction: Direction,
    ) -> Result<EdgeCandidate, CausalError> {
        let distance = effect
            .line
            .index
            .saturating_sub(cause.line.index)
            .max(MIN_DISTANCE);

        let distance_score = scoring::hill_curve(
            distance as f64,
            self.config.hill_tau,
            self.config.hill_steepness,
        );
        let lexical_score = scoring::overlap(&cause.tokens, &effect.tokens);

        let mut answer_boost = 0.0;
        if self.answer_matcher.is_answer(&effect.line.text) {
            answer_boost += self.config.answer_boost;
        }
        let is_roll = effect
            .line
            .effect
            .as_ref()
            .is_some_and(|e| e.effect_type == ROLL_EFFECT_TYPE);
        if is_roll && direction == Direction::Backward {
            answer_boost += self.config.roll_backward_boost;
        }

        let strength_ce = distance_score * (1.0 + self.config.beta_lex * lexical_score) + answer_boost;
        let strength_ce = scoring::ensure_finite(strength_ce, || {
            format!(
                "strength_ce for cause {} -> effect {}",
                cause.line.index, effect.line.index
            )
        })?;

        Ok(EdgeCandidate {
            cause_index: cause.line.index,
            effect_index: effect.line.index,
            direction,
            distance,
            distance_score,
            lexical_score,
            answer_boost,
            strength_ce,
        })
    }
}

/// Whether `a` should replace `b` for the same pair: higher strength, then
/// smaller distance, then forward.
fn prefer(a: &EdgeCandidate, b: &EdgeCandidate) -> bool {
    b.strength_ce
        .total_cmp(&a.strength_ce)
        .then_with(|| a.distance.cmp(&b.distance))
        .then_with(|| a.direction.cmp(&b.direction))
        .is_lt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::models::{Actor, CauseDetection, EffectDetection};
    use saga_core::traits::NoAnswerMatcher;

    fn cause_line(index: usize, text: &str) -> DetectedLine {
        DetectedLine {
            position: index,
            index,
            text: text.to_string(),
            cause: Some((
                CauseDetection::detected("question", 0.5),
                Actor {
                    id: "p".to_string(),
                    name: "P".to_string(),
                },
            )),
            effect: None,
        }
    }

    fn effect_line(index: usize, text: &str, effect_type: &str) -> DetectedLine {
        DetectedLine {
            position: index,
            index,
            text: text.to_string(),
            cause: None,
            effect: Some(EffectDetection::detected(effect_type, 0.5)),
        }
    }

    #[test]
    fn forward_window_is_limited_to_k_local() {
        let config = CandidateConfig {
            k_local: 2,
            ..Default::default()
        };
        let matcher = NoAnswerMatcher;
        let generator = CandidateGenerator::new(&config, &matcher);
        let lines = vec![
            cause_line(0, "what now"),
            effect_line(1, "one", "information"),
            effect_line(2, "two", "information"),
            effect_line(3, "three", "information"),
        ];
        let candidates = generator.generate(&lines).unwrap();
        let effects: Vec<usize> = candidates.iter().map(|c| c.effect_index).collect();
        // Backward scans also reach effect 3 because the cause is its nearest.
        assert_eq!(effects, vec![1, 2, 3]);
        assert_eq!(candidates[2].direction, Direction::Backward);
        assert_eq!(candidates[0].direction, Direction::Forward);
    }

    #[test]
    fn roll_found_backward_gets_bonus_and_wins_the_pair() {
        let config = CandidateConfig::default();
        let matcher = NoAnswerMatcher;
        let generator = CandidateGenerator::new(&config, &matcher);
        let lines = vec![cause_line(4, "I attack"), effect_line(5, "rolls 17", "roll")];
        let candidates = generator.generate(&lines).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].direction, Direction::Backward);
        assert!((candidates[0].answer_boost - config.roll_backward_boost).abs() < 1e-12);
    }

    #[test]
    fn equal_strength_prefers_forward() {
        let config = CandidateConfig::default();
        let matcher = NoAnswerMatcher;
        let generator = CandidateGenerator::new(&config, &matcher);
        let lines = vec![cause_line(1, "hello"), effect_line(3, "world", "information")];
        let candidates = generator.generate(&lines).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].direction, Direction::Forward);
        assert_eq!(candidates[0].distance, 2);
    }

    #[test]
    fn effects_before_a_cause_are_not_paired() {
        let config = CandidateConfig::default();
        let matcher = NoAnswerMatcher;
        let generator = CandidateGenerator::new(&config, &matcher);
        let lines = vec![effect_line(1, "earlier", "information"), cause_line(2, "later")];
        assert!(generator.generate(&lines).unwrap().is_empty());
    }
}
