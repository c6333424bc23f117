//! Token-overlap lexical similarity.

use rustc_hash::FxHashSet;
use saga_core::constants::MIN_TOKEN_CHARS;

pub type TokenSet = FxHashSet<String>;

/// Lower-cased alphanumeric tokens longer than `MIN_TOKEN_CHARS`, deduplicated.
pub fn token_set(text: &str) -> TokenSet {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// `|A ∩ B| / max(|A|, |B|)`, or 0 when both sets are empty.
pub fn overlap(a: &TokenSet, b: &TokenSet) -> f64 {
    let denom = a.len().max(b.len());
    if denom == 0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|t| large.contains(*t)).count();
    shared as f64 / denom as f64
}

/// Convenience wrapper tokenizing both texts.
pub fn token_overlap(a: &str, b: &str) -> f64 {
    overlap(&token_set(a), &token_set(b))
}
