//! Hierarchy composition and the cross-round graph view.

pub mod composer;
pub mod graph;

pub use composer::{node_order, Composer, CompositionOutcome, PairCandidate};
pub use graph::{HierarchyGraph, HierarchyVertex};
