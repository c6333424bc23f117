use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::Tier;

/// Absolute mass cutoffs for narrative tiers. Each cutoff is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub beat: f64,
    pub event: f64,
    pub scene: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            beat: defaults::DEFAULT_TIER_BEAT,
            event: defaults::DEFAULT_TIER_EVENT,
            scene: defaults::DEFAULT_TIER_SCENE,
        }
    }
}

impl TierThresholds {
    /// Tier for a given mass. Below `beat` a node stays at `Tier::Link`.
    pub fn classify(&self, mass: f64) -> Tier {
        if mass >= self.scene {
            Tier::Scene
        } else if mass >= self.event {
            Tier::Event
        } else if mass >= self.beat {
            Tier::Beat
        } else {
            Tier::Link
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        super::check_non_negative("tiers.beat", self.beat)?;
        super::check_non_negative("tiers.event", self.event)?;
        super::check_non_negative("tiers.scene", self.scene)?;
        if !(self.beat < self.event && self.event < self.scene) {
            return Err(ConfigError::invalid(
                "tiers",
                format!(
                    "thresholds must strictly increase (beat {} < event {} < scene {})",
                    self.beat, self.event, self.scene
                ),
            ));
        }
        Ok(())
    }
}
