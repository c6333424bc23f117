// Single source of truth for all default values.

// --- Candidate generation ---
pub const DEFAULT_K_LOCAL: usize = 8;
pub const DEFAULT_CANDIDATE_HILL_TAU: f64 = 3.0;
pub const DEFAULT_CANDIDATE_HILL_STEEPNESS: f64 = 2.0;
pub const DEFAULT_BETA_LEX: f64 = 0.5;
pub const DEFAULT_ANSWER_BOOST: f64 = 0.15;
pub const DEFAULT_ROLL_BACKWARD_BOOST: f64 = 0.10;

// --- Annealing ---
pub const DEFAULT_WINDOW_LINKS: f64 = 20.0;
pub const DEFAULT_ANNEAL_HILL_TAU: f64 = 6.0;
pub const DEFAULT_ANNEAL_HILL_STEEPNESS: f64 = 2.0;
pub const DEFAULT_BETA_LEX_LL: f64 = 0.5;
pub const DEFAULT_LAMBDA: f64 = 0.25;
pub const DEFAULT_TOP_K_CONTRIB: usize = 3;
pub const DEFAULT_INCLUDE_CONTEXT: bool = false;

// --- Hierarchy ---
pub const DEFAULT_ROUNDS: u32 = 3;
pub const DEFAULT_WINDOW_NODES: f64 = 30.0;
pub const DEFAULT_HIERARCHY_HILL_TAU: f64 = 10.0;
pub const DEFAULT_HIERARCHY_HILL_STEEPNESS: f64 = 2.0;
pub const DEFAULT_HIERARCHY_BETA_LEX: f64 = 0.5;
pub const DEFAULT_THRESHOLD_LINK: f64 = 0.25;

// --- Tiers ---
pub const DEFAULT_TIER_BEAT: f64 = 0.8;
pub const DEFAULT_TIER_EVENT: f64 = 1.5;
pub const DEFAULT_TIER_SCENE: f64 = 3.0;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "saga=info";
