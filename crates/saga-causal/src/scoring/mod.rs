//! Shared scoring primitives: distance decay, lexical overlap, finiteness guard.

pub mod hill;
pub mod lexical;

pub use hill::hill_curve;
pub use lexical::{overlap, token_overlap, token_set, TokenSet};

use saga_core::errors::CausalError;

/// Reject NaN/Infinity instead of letting it flow into sorts and masses.
pub fn ensure_finite(value: f64, context: impl FnOnce() -> String) -> Result<f64, CausalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CausalError::NonFiniteScore {
            context: context(),
            value,
        })
    }
}
