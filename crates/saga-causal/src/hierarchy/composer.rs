//! Round-based composition: pair round-k nodes into round-(k+1) composites.
//!
//! Pairs within `window_nodes` of each other are scored with
//! `bridge = hill(center_distance) × (1 + beta_lex × lexical)` and gated by
//! `threshold_link`. Selection is a global greedy one-to-one matching, the
//! same policy as leaf allocation: every node joins at most one composite
//! per round. Nodes left unmatched are carried into the next round as-is.

use std::cmp::Ordering;

use saga_core::config::{HierarchyConfig, TierThresholds};
use saga_core::errors::CausalError;
use saga_core::models::{GraphNode, JoinInfo};
use tracing::debug;

use crate::scoring::{self, TokenSet};

/// A scored proposal to merge two nodes. `left` sorts before `right`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCandidate {
    pub left: usize,
    pub right: usize,
    pub bridge: f64,
    pub center_distance: f64,
    pub lexical: f64,
}

/// Node set for the next round plus bookkeeping.
#[derive(Debug, Clone)]
pub struct CompositionOutcome {
    /// New composites and carried nodes, ordered by span then id.
    pub nodes: Vec<GraphNode>,
    pub merged: usize,
    pub carried: usize,
}

pub struct Composer<'a> {
    config: &'a HierarchyConfig,
    tiers: &'a TierThresholds,
    include_context: bool,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a HierarchyConfig, tiers: &'a TierThresholds, include_context: bool) -> Self {
        Self {
            config,
            tiers,
            include_context,
        }
    }

    /// Every pair within the window whose bridge clears `threshold_link`.
    pub fn propose(&self, nodes: &[GraphNode]) -> Result<Vec<PairCandidate>, CausalError> {
        let tokens: Vec<TokenSet> = nodes
            .iter()
            .map(|n| scoring::token_set(&n.lexical_text(self.include_context)))
            .collect();

        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| node_order(&nodes[a], &nodes[b]));

        let window = self.config.window_nodes;
        let mut pairs = Vec::new();

        for (pos, &a) in order.iter().enumerate() {
            for &b in &order[pos + 1..] {
                let center_distance = (nodes[b].center_index - nodes[a].center_index).abs();
                if center_distance > window {
                    break;
                }
                let lexical = scoring::overlap(&tokens[a], &tokens[b]);
                let bridge = scoring::hill_curve(
                    center_distance,
                    self.config.hill_tau,
                    self.config.hill_steepness,
                ) * (1.0 + self.config.beta_lex * lexical);
                let bridge = scoring::ensure_finite(bridge, || {
                    format!("bridge {} <-> {}", nodes[a].id, nodes[b].id)
                })?;
                if bridge >= self.config.threshold_link {
                    pairs.push(PairCandidate {
                        left: a,
                        right: b,
                        bridge,
                        center_distance,
                        lexical,
                    });
                }
            }
        }

        Ok(pairs)
    }

    /// Greedy one-to-one selection over `pairs`.
    pub fn select(&self, nodes: &[GraphNode], mut pairs: Vec<PairCandidate>) -> Vec<PairCandidate> {
        pairs.sort_by(|x, y| compare_pairs(nodes, x, y));
        let mut used = vec![false; nodes.len()];
        let mut chosen = Vec::new();
        for pair in pairs {
            if used[pair.left] || used[pair.right] {
                continue;
            }
            used[pair.left] = true;
            used[pair.right] = true;
            chosen.push(pair);
        }
        chosen
    }

    /// Build the node set of round `round` (≥ 2) from the annealed nodes of
    /// the previous round. Input nodes are not modified.
    pub fn compose(&self, round: u32, nodes: &[GraphNode]) -> Result<CompositionOutcome, CausalError> {
        let pairs = self.propose(nodes)?;
        let proposed = pairs.len();
        let chosen = self.select(nodes, pairs);

        let mut merged_flags = vec![false; nodes.len()];
        let mut composites: Vec<GraphNode> = chosen
            .iter()
            .map(|pair| {
                merged_flags[pair.left] = true;
                merged_flags[pair.right] = true;
                GraphNode::composite(
                    String::new(),
                    round,
                    &nodes[pair.left],
                    &nodes[pair.right],
                    pair.bridge,
                    JoinInfo {
                        join_center_distance: pair.center_distance,
                        join_lexical_score: pair.lexical,
                    },
                    self.config.mass_combination,
                    self.tiers,
                )
            })
            .collect();

        composites.sort_by(|a, b| {
            (a.span_start_index, a.span_end_index, &a.members)
                .cmp(&(b.span_start_index, b.span_end_index, &b.members))
        });
        for (ordinal, node) in composites.iter_mut().enumerate() {
            node.id = format!("r{round}-n{ordinal}");
        }

        let merged = composites.len();
        let carried_nodes: Vec<GraphNode> = nodes
            .iter()
            .zip(&merged_flags)
            .filter(|(_, &merged)| !merged)
            .map(|(node, _)| node.clone())
            .collect();
        let carried = carried_nodes.len();

        let mut next = composites;
        next.extend(carried_nodes);
        next.sort_by(node_order);

        debug!(round, proposed, merged, carried, "composition round built");

        Ok(CompositionOutcome {
            nodes: next,
            merged,
            carried,
        })
    }
}

/// Center, span start, span end, then id.
pub fn node_order(a: &GraphNode, b: &GraphNode) -> Ordering {
    a.center_index
        .total_cmp(&b.center_index)
        .then_with(|| a.span_start_index.cmp(&b.span_start_index))
        .then_with(|| a.span_end_index.cmp(&b.span_end_index))
        .then_with(|| a.id.cmp(&b.id))
}

/// Bridge desc, center distance asc, then the pair's ids.
fn compare_pairs(nodes: &[GraphNode], x: &PairCandidate, y: &PairCandidate) -> Ordering {
    y.bridge
        .total_cmp(&x.bridge)
        .then_with(|| x.center_distance.total_cmp(&y.center_distance))
        .then_with(|| nodes[x.left].id.cmp(&nodes[y.left].id))
        .then_with(|| nodes[x.right].id.cmp(&nodes[y.right].id))
}
