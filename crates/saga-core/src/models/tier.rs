use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse narrative scale derived from mass. Ordered `Link < Beat < Event < Scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Link,
    Beat,
    Event,
    Scene,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Beat => "beat",
            Self::Event => "event",
            Self::Scene => "scene",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
