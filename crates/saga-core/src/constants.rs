/// Saga engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokens must be longer than this many characters to count for lexical overlap.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Minimum pairing distance. Same-line pairings are never formed.
pub const MIN_DISTANCE: usize = 1;

/// Effect type that earns the backward-scan roll bonus.
pub const ROLL_EFFECT_TYPE: &str = "roll";
