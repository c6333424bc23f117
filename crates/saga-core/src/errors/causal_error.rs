/// Causal hierarchy errors.
#[derive(Debug, thiserror::Error)]
pub enum CausalError {
    #[error("non-finite score in {context}: {value}")]
    NonFiniteScore { context: String, value: f64 },

    #[error("composite member {id} does not resolve to a prior node")]
    UnknownMember { id: String },

    #[error("graph inconsistency: {details}")]
    GraphInconsistency { details: String },
}
