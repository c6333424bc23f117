use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Neighbor reinforcement parameters for the mass annealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Maximum center distance (inclusive) for two nodes to reinforce each other.
    pub window_links: f64,
    pub hill_tau: f64,
    pub hill_steepness: f64,
    /// Multiplicative weight of lexical overlap between neighbors.
    pub beta_lex_ll: f64,
    /// Damping applied to the summed neighbor contributions.
    pub lambda: f64,
    /// Contributors kept per node for explainability.
    pub top_k_contrib: usize,
    /// Include in-between context lines in the lexical signal.
    pub include_context: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            window_links: defaults::DEFAULT_WINDOW_LINKS,
            hill_tau: defaults::DEFAULT_ANNEAL_HILL_TAU,
            hill_steepness: defaults::DEFAULT_ANNEAL_HILL_STEEPNESS,
            beta_lex_ll: defaults::DEFAULT_BETA_LEX_LL,
            lambda: defaults::DEFAULT_LAMBDA,
            top_k_contrib: defaults::DEFAULT_TOP_K_CONTRIB,
            include_context: defaults::DEFAULT_INCLUDE_CONTEXT,
        }
    }
}

impl AnnealConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        super::check_non_negative("anneal.window_links", self.window_links)?;
        super::check_positive("anneal.hill_tau", self.hill_tau)?;
        super::check_positive("anneal.hill_steepness", self.hill_steepness)?;
        super::check_non_negative("anneal.beta_lex_ll", self.beta_lex_ll)?;
        super::check_non_negative("anneal.lambda", self.lambda)?;
        if self.top_k_contrib == 0 {
            return Err(ConfigError::invalid(
                "anneal.top_k_contrib",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
