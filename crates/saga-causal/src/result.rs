//! Output of a run: the annealed node set of every round plus diagnostics.

use std::collections::BTreeMap;

use saga_core::errors::{CausalError, SagaResult};
use saga_core::models::{AllocationTraceEntry, GraphNode, MassDelta, NodeKind, Tier};
use serde::{Deserialize, Serialize};

use crate::anneal::delta_report_tsv;
use crate::hierarchy::HierarchyGraph;

/// One round after its anneal pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// 1 for leaves.
    pub round: u32,
    pub nodes: Vec<GraphNode>,
    /// One row per node, from this round's anneal pass.
    pub deltas: Vec<MassDelta>,
    /// Composites created this round. Zero for the leaf round.
    pub merged: usize,
    /// Nodes carried over unmerged from the previous round.
    pub carried: usize,
}

/// Full hierarchy produced by one run. Round snapshots are ordered from the
/// leaf round up; the last one is the final hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyResult {
    pub rounds: Vec<RoundSnapshot>,
    pub allocation_trace: Vec<AllocationTraceEntry>,
    pub unclaimed_effects: Vec<usize>,
    pub candidates_considered: usize,
}

impl HierarchyResult {
    pub fn round(&self, round: u32) -> Option<&RoundSnapshot> {
        self.rounds.iter().find(|r| r.round == round)
    }

    pub fn final_round(&self) -> Option<&RoundSnapshot> {
        self.rounds.last()
    }

    /// Annealed leaves of round 1.
    pub fn leaves(&self) -> &[GraphNode] {
        self.rounds.first().map(|r| r.nodes.as_slice()).unwrap_or(&[])
    }

    pub fn final_nodes(&self) -> &[GraphNode] {
        self.final_round()
            .map(|r| r.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Latest snapshot of the node with `id`. Carried nodes resolve to their
    /// most recent round.
    pub fn find_node(&self, id: &str) -> Option<&GraphNode> {
        self.rounds
            .iter()
            .rev()
            .find_map(|r| r.nodes.iter().find(|n| n.id == id))
    }

    /// Build the composite → member graph across all rounds.
    pub fn graph(&self) -> Result<HierarchyGraph, CausalError> {
        HierarchyGraph::from_rounds(self.rounds.iter().map(|r| r.nodes.as_slice()))
    }

    /// TSV mass-delta report of one round's anneal pass.
    pub fn delta_report_tsv(&self, round: u32) -> Option<String> {
        self.round(round).map(|r| delta_report_tsv(&r.deltas))
    }

    pub fn to_json(&self) -> SagaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SagaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// blake3 digest (hex) over every round's serialized node set.
    /// Identical inputs and parameters always yield the same fingerprint.
    pub fn fingerprint(&self) -> SagaResult<String> {
        let mut hasher = blake3::Hasher::new();
        for round in &self.rounds {
            hasher.update(&round.round.to_le_bytes());
            hasher.update(&serde_json::to_vec(&round.nodes)?);
        }
        Ok(hasher.finalize().to_hex().to_string())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            rounds: self.rounds.iter().map(RoundSummary::of).collect(),
            unclaimed_effects: self.unclaimed_effects.len(),
            candidates_considered: self.candidates_considered,
        }
    }
}

/// Counts per round, kind and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rounds: Vec<RoundSummary>,
    pub unclaimed_effects: usize,
    pub candidates_considered: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub nodes: usize,
    pub singletons: usize,
    pub links: usize,
    pub composites: usize,
    pub merged: usize,
    pub carried: usize,
    pub tiers: BTreeMap<Tier, usize>,
    pub total_mass: f64,
    pub total_boost: f64,
}

impl RoundSummary {
    fn of(snapshot: &RoundSnapshot) -> Self {
        let count = |kind: NodeKind| snapshot.nodes.iter().filter(|n| n.kind == kind).count();
        let mut tiers = BTreeMap::new();
        for node in &snapshot.nodes {
            *tiers.entry(node.tier).or_insert(0) += 1;
        }
        Self {
            round: snapshot.round,
            nodes: snapshot.nodes.len(),
            singletons: count(NodeKind::Singleton),
            links: count(NodeKind::Link),
            composites: count(NodeKind::Composite),
            merged: snapshot.merged,
            carried: snapshot.carried,
            tiers,
            total_mass: snapshot.nodes.iter().map(|n| n.mass).sum(),
            total_boost: snapshot.nodes.iter().map(|n| n.mass_boost).sum(),
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }
}
