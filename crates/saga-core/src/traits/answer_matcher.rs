/// Recognizes effect text that reads like a yes/no answer.
pub trait IAnswerMatcher: Send + Sync {
    fn is_answer(&self, text: &str) -> bool;
}

/// Matcher that never fires. Disables the answer bonus.
pub struct NoAnswerMatcher;

impl IAnswerMatcher for NoAnswerMatcher {
    fn is_answer(&self, _text: &str) -> bool {
        false
    }
}
