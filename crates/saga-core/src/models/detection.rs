use serde::{Deserialize, Serialize};

/// Output of a cause detector for one line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseDetection {
    pub is_cause: bool,
    /// Open vocabulary: "question", "propose", "action", "roll", ...
    #[serde(rename = "type")]
    pub cause_type: String,
    /// Detector-intrinsic salience in `[0, 1]`.
    pub mass: f64,
}

impl CauseDetection {
    pub fn detected(cause_type: impl Into<String>, mass: f64) -> Self {
        Self {
            is_cause: true,
            cause_type: cause_type.into(),
            mass,
        }
    }

    pub fn none() -> Self {
        Self {
            is_cause: false,
            cause_type: String::new(),
            mass: 0.0,
        }
    }
}

/// Output of an effect detector for one line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDetection {
    pub is_effect: bool,
    /// Open vocabulary: "information", "answer", "roll", ...
    #[serde(rename = "type")]
    pub effect_type: String,
    pub mass: f64,
}

impl EffectDetection {
    pub fn detected(effect_type: impl Into<String>, mass: f64) -> Self {
        Self {
            is_effect: true,
            effect_type: effect_type.into(),
            mass,
        }
    }

    pub fn none() -> Self {
        Self {
            is_effect: false,
            effect_type: String::new(),
            mass: 0.0,
        }
    }
}

/// A resolved participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
}
