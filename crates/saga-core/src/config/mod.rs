//! Configuration system for Saga.
//! TOML-based, layered: env > file > defaults.

pub mod anneal_config;
pub mod candidate_config;
pub mod defaults;
pub mod engine_config;
pub mod hierarchy_config;
pub mod tier_config;

pub use anneal_config::AnnealConfig;
pub use candidate_config::CandidateConfig;
pub use engine_config::EngineConfig;
pub use hierarchy_config::{HierarchyConfig, MassCombination};
pub use tier_config::TierThresholds;

use crate::errors::ConfigError;

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be a finite value greater than 0, got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}
