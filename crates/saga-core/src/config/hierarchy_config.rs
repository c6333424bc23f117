use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// How a composite's base mass is derived from its two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassCombination {
    #[default]
    Sum,
    Mean,
    Max,
}

impl MassCombination {
    pub fn combine(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Sum => left + right,
            Self::Mean => (left + right) / 2.0,
            Self::Max => left.max(right),
        }
    }
}

/// Round-based composition parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Total rounds, counting the leaf round. `1` means leaves only.
    pub rounds: u32,
    /// Maximum center distance (inclusive) for two nodes to be paired.
    pub window_nodes: f64,
    pub hill_tau: f64,
    pub hill_steepness: f64,
    pub beta_lex: f64,
    /// Minimum bridge strength for a pair to merge.
    pub threshold_link: f64,
    pub mass_combination: MassCombination,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            rounds: defaults::DEFAULT_ROUNDS,
            window_nodes: defaults::DEFAULT_WINDOW_NODES,
            hill_tau: defaults::DEFAULT_HIERARCHY_HILL_TAU,
            hill_steepness: defaults::DEFAULT_HIERARCHY_HILL_STEEPNESS,
            beta_lex: defaults::DEFAULT_HIERARCHY_BETA_LEX,
            threshold_link: defaults::DEFAULT_THRESHOLD_LINK,
            mass_combination: MassCombination::default(),
        }
    }
}

impl HierarchyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::invalid(
                "hierarchy.rounds",
                "must be at least 1",
            ));
        }
        super::check_non_negative("hierarchy.window_nodes", self.window_nodes)?;
        super::check_positive("hierarchy.hill_tau", self.hill_tau)?;
        super::check_positive("hierarchy.hill_steepness", self.hill_steepness)?;
        super::check_non_negative("hierarchy.beta_lex", self.beta_lex)?;
        super::check_non_negative("hierarchy.threshold_link", self.threshold_link)?;
        Ok(())
    }
}
