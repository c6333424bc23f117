//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnnealConfig, CandidateConfig, HierarchyConfig, TierThresholds};
use crate::errors::ConfigError;

/// Environment variables consulted by [`EngineConfig::apply_env_overrides`].
pub const ENV_K_LOCAL: &str = "SAGA_K_LOCAL";
pub const ENV_ROUNDS: &str = "SAGA_ROUNDS";
pub const ENV_WINDOW_LINKS: &str = "SAGA_WINDOW_LINKS";
pub const ENV_LAMBDA: &str = "SAGA_LAMBDA";

/// Configuration aggregating every tunable of a run.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SAGA_*`)
/// 2. TOML file passed to [`EngineConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub candidates: CandidateConfig,
    pub anneal: AnnealConfig,
    pub hierarchy: HierarchyConfig,
    pub tiers: TierThresholds,
}

impl EngineConfig {
    /// Load configuration: defaults, then the optional TOML file, then env overrides.
    /// The result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SAGA_*` environment overrides. Unparseable values are rejected.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<usize>(ENV_K_LOCAL)? {
            self.candidates.k_local = v;
        }
        if let Some(v) = env_parse::<u32>(ENV_ROUNDS)? {
            self.hierarchy.rounds = v;
        }
        if let Some(v) = env_parse::<f64>(ENV_WINDOW_LINKS)? {
            self.anneal.window_links = v;
        }
        if let Some(v) = env_parse::<f64>(ENV_LAMBDA)? {
            self.anneal.lambda = v;
        }
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.candidates.validate()?;
        self.anneal.validate()?;
        self.hierarchy.validate()?;
        self.tiers.validate()?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}
