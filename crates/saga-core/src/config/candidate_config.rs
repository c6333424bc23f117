use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Cause→effect candidate scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// How many nearest eligible partners each scan direction considers.
    pub k_local: usize,
    /// Distance (in transcript lines) at which the distance score halves.
    pub hill_tau: f64,
    /// Exponent of the distance decay.
    pub hill_steepness: f64,
    /// Multiplicative weight of lexical overlap.
    pub beta_lex: f64,
    /// Flat bonus when the effect reads like a yes/no answer.
    pub answer_boost: f64,
    /// Extra bonus for a "roll" effect found by the backward scan.
    pub roll_backward_boost: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            k_local: defaults::DEFAULT_K_LOCAL,
            hill_tau: defaults::DEFAULT_CANDIDATE_HILL_TAU,
            hill_steepness: defaults::DEFAULT_CANDIDATE_HILL_STEEPNESS,
            beta_lex: defaults::DEFAULT_BETA_LEX,
            answer_boost: defaults::DEFAULT_ANSWER_BOOST,
            roll_backward_boost: defaults::DEFAULT_ROLL_BACKWARD_BOOST,
        }
    }
}

impl CandidateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k_local == 0 {
            return Err(ConfigError::invalid(
                "candidates.k_local",
                "must be greater than 0",
            ));
        }
        super::check_positive("candidates.hill_tau", self.hill_tau)?;
        super::check_positive("candidates.hill_steepness", self.hill_steepness)?;
        super::check_non_negative("candidates.beta_lex", self.beta_lex)?;
        super::check_non_negative("candidates.answer_boost", self.answer_boost)?;
        super::check_non_negative(
            "candidates.roll_backward_boost",
            self.roll_backward_boost,
        )?;
        Ok(())
    }
}
