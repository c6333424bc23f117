//! Keyword/regex cause and effect detectors.
//!
//! Rules are tried in order; the first match decides the type and mass.
//! A pattern that failed to compile makes the detector unavailable rather
//! than silently skipping lines.

use std::sync::LazyLock;

use regex::Regex;
use saga_core::errors::DetectionError;
use saga_core::models::{CauseDetection, EffectDetection};
use saga_core::traits::{ICauseDetector, IEffectDetector};

/// A compiled detection rule.
pub struct KeywordRule {
    /// Detection type reported on match.
    pub label: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub mass: f64,
}

macro_rules! keyword_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Causes ─────────────────────────────────────────────────────────────────
keyword_pattern!(
    RE_CAUSE_ROLL,
    r"(?i)\b(?:i|let me|can i|may i)\s+(?:roll|make)\b|\broll(?:ing)?\s+(?:for|a|an|to)\b"
);
keyword_pattern!(
    RE_CAUSE_PROPOSE,
    r"(?i)\b(?:let'?s|we should|we could|how about|what if|maybe we)\b"
);
keyword_pattern!(
    RE_CAUSE_QUESTION,
    r"(?i)\?\s*$|^\s*(?:can|could|may|what|where|who|how|why|is|are|do|does)\b"
);
keyword_pattern!(
    RE_CAUSE_ACTION,
    r"(?i)^\s*i\s+(?:attack|cast|open|grab|move|run|search|draw|try|go|climb|sneak|pick|take|use|push|pull|hide)\b|\bi'?ll\s+\w+"
);

// ── Effects ────────────────────────────────────────────────────────────────
keyword_pattern!(
    RE_EFFECT_ROLL,
    r"(?i)\b(?:rolls?|rolled)\b\D*\d+|\bnat(?:ural)?\s*(?:1|20)\b|\b\d+\s+(?:to hit|damage)\b"
);
keyword_pattern!(
    RE_EFFECT_ANSWER,
    r"(?i)^\s*(?:yes|no|yeah|yep|nope|sure|of course|you can|you can't|you cannot)\b"
);
keyword_pattern!(
    RE_EFFECT_INFORMATION,
    r"(?i)\b(?:you (?:see|hear|notice|find|feel|smell|spot)|there (?:is|are)|it (?:is|looks|seems))\b"
);

pub static CAUSE_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "roll",
        regex: &RE_CAUSE_ROLL,
        mass: 0.7,
    },
    KeywordRule {
        label: "propose",
        regex: &RE_CAUSE_PROPOSE,
        mass: 0.5,
    },
    KeywordRule {
        label: "question",
        regex: &RE_CAUSE_QUESTION,
        mass: 0.6,
    },
    KeywordRule {
        label: "action",
        regex: &RE_CAUSE_ACTION,
        mass: 0.5,
    },
];

pub static EFFECT_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "roll",
        regex: &RE_EFFECT_ROLL,
        mass: 0.6,
    },
    KeywordRule {
        label: "answer",
        regex: &RE_EFFECT_ANSWER,
        mass: 0.5,
    },
    KeywordRule {
        label: "information",
        regex: &RE_EFFECT_INFORMATION,
        mass: 0.4,
    },
];

fn first_match<'r>(
    detector: &str,
    rules: &'r [KeywordRule],
    text: &str,
) -> Result<Option<&'r KeywordRule>, DetectionError> {
    for rule in rules {
        let Some(regex) = rule.regex.as_ref() else {
            return Err(DetectionError::Unavailable {
                detector: detector.to_string(),
                reason: format!("pattern {:?} failed to compile", rule.label),
            });
        };
        if regex.is_match(text) {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}

/// Questions, proposals, actions and roll requests.
pub struct KeywordCauseDetector {
    rules: &'static [KeywordRule],
}

impl KeywordCauseDetector {
    pub fn new() -> Self {
        Self { rules: CAUSE_RULES }
    }

    pub fn with_rules(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }
}

impl Default for KeywordCauseDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ICauseDetector for KeywordCauseDetector {
    fn detect_cause(&self, text: &str) -> Result<CauseDetection, DetectionError> {
        Ok(match first_match(self.name(), self.rules, text)? {
            Some(rule) => CauseDetection::detected(rule.label, rule.mass),
            None => CauseDetection::none(),
        })
    }

    fn name(&self) -> &str {
        "keyword-cause"
    }
}

/// Roll results, answers and narrated information.
pub struct KeywordEffectDetector {
    rules: &'static [KeywordRule],
}

impl KeywordEffectDetector {
    pub fn new() -> Self {
        Self {
            rules: EFFECT_RULES,
        }
    }

    pub fn with_rules(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }
}

impl Default for KeywordEffectDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl IEffectDetector for KeywordEffectDetector {
    fn detect_effect(&self, text: &str) -> Result<EffectDetection, DetectionError> {
        Ok(match first_match(self.name(), self.rules, text)? {
            Some(rule) => EffectDetection::detected(rule.label, rule.mass),
            None => EffectDetection::none(),
        })
    }

    fn name(&self) -> &str {
        "keyword-effect"
    }
}
