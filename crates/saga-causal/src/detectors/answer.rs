use std::sync::LazyLock;

use regex::Regex;
use saga_core::traits::IAnswerMatcher;

static RE_YES_NO: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:yes|no|yeah|yep|yup|nope|nah|sure|of course|absolutely|not really|you can(?:'t|not)?)\b",
    )
    .ok()
});

/// Matches effect text that opens like a yes/no answer.
pub struct YesNoAnswerMatcher;

impl YesNoAnswerMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YesNoAnswerMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IAnswerMatcher for YesNoAnswerMatcher {
    fn is_answer(&self, text: &str) -> bool {
        RE_YES_NO.as_ref().is_some_and(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_yes_no_openers() {
        let m = YesNoAnswerMatcher::new();
        assert!(m.is_answer("Yes, the door is unlocked."));
        assert!(m.is_answer("  nope"));
        assert!(m.is_answer("You can't reach it from here."));
        assert!(!m.is_answer("You see a door."));
        assert!(!m.is_answer("Nobody answers."));
    }
}
