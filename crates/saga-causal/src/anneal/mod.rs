//! Mass annealing: one synchronous pass of windowed neighbor reinforcement.
//!
//! For every ordered pair `(i, j)` with `|center(i) - center(j)| <= window_links`:
//! `strength_ll = hill(distance) × (1 + beta_lex_ll × lexical)` and
//! `contrib(j → i) = strength_ll × mass_prev(j)`.
//! Then `boost(i) = lambda × Σ contrib(j → i)`.
//!
//! Every node reads its neighbors' masses from a snapshot taken before the
//! pass, so the result does not depend on update order.

pub mod report;

use std::cmp::Ordering;

use rayon::prelude::*;
use saga_core::config::{AnnealConfig, TierThresholds};
use saga_core::errors::CausalError;
use saga_core::models::{GraphNode, MassDelta, NeighborEdgeTrace};
use tracing::debug;

use crate::scoring::{self, TokenSet};

pub use report::{delta_report_tsv, DELTA_REPORT_HEADER};

/// Read-only view of the node set taken before the pass.
struct Snapshot {
    ids: Vec<String>,
    centers: Vec<f64>,
    masses: Vec<f64>,
    tokens: Vec<TokenSet>,
    /// Node positions sorted by (center, id).
    order: Vec<usize>,
    sorted_centers: Vec<f64>,
}

impl Snapshot {
    fn take(nodes: &[GraphNode], include_context: bool) -> Self {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| {
            nodes[a]
                .center_index
                .total_cmp(&nodes[b].center_index)
                .then_with(|| nodes[a].id.cmp(&nodes[b].id))
        });
        Self {
            ids: nodes.iter().map(|n| n.id.clone()).collect(),
            centers: nodes.iter().map(|n| n.center_index).collect(),
            masses: nodes.iter().map(|n| n.mass).collect(),
            tokens: nodes
                .par_iter()
                .map(|n| scoring::token_set(&n.lexical_text(include_context)))
                .collect(),
            sorted_centers: order.iter().map(|&i| nodes[i].center_index).collect(),
            order,
        }
    }
}

/// Per-node result before it is written back.
struct Reinforcement {
    boost: f64,
    contributors: Vec<NeighborEdgeTrace>,
}

/// Result of one pass: a delta row per node, in node order.
#[derive(Debug, Clone, Default)]
pub struct AnnealReport {
    pub deltas: Vec<MassDelta>,
}

impl AnnealReport {
    pub fn to_tsv(&self) -> String {
        delta_report_tsv(&self.deltas)
    }

    pub fn total_boost(&self) -> f64 {
        self.deltas.iter().map(|d| d.boost).sum()
    }
}

/// Level-agnostic annealer.
pub struct Annealer<'a> {
    config: &'a AnnealConfig,
    tiers: &'a TierThresholds,
}

impl<'a> Annealer<'a> {
    pub fn new(config: &'a AnnealConfig, tiers: &'a TierThresholds) -> Self {
        Self { config, tiers }
    }

    /// Run one pass over `nodes`, updating mass, tier, center and top
    /// contributors in place.
    pub fn anneal(&self, nodes: &mut [GraphNode]) -> Result<AnnealReport, CausalError> {
        let snapshot = Snapshot::take(nodes, self.config.include_context);

        let reinforcements: Vec<Reinforcement> = (0..nodes.len())
            .into_par_iter()
            .map(|i| self.reinforce(i, &snapshot))
            .collect::<Result<_, _>>()?;

        let mut deltas = Vec::with_capacity(nodes.len());
        for (node, reinforcement) in nodes.iter_mut().zip(reinforcements) {
            let mass_base_before = node.mass_base;
            let mass_prev = node.mass;
            let tier_prev = node.tier;

            node.set_mass(mass_prev, reinforcement.boost, self.tiers);
            node.recenter();
            let top_contributor_id = reinforcement
                .contributors
                .first()
                .map(|t| t.from_id.clone());
            node.top_contributors = reinforcement.contributors;

            if node.tier != tier_prev {
                debug!(
                    id = %node.id,
                    from = %tier_prev,
                    to = %node.tier,
                    mass = node.mass,
                    "tier changed"
                );
            }

            deltas.push(MassDelta {
                link_id: node.id.clone(),
                mass_base: mass_base_before,
                mass_prev,
                mass_new: node.mass,
                boost: node.mass_boost,
                tier_prev,
                tier_new: node.tier,
                top_contributor_id,
            });
        }

        Ok(AnnealReport { deltas })
    }

    fn reinforce(&self, i: usize, snap: &Snapshot) -> Result<Reinforcement, CausalError> {
        let window = self.config.window_links;
        let center = snap.centers[i];
        let lo = snap.sorted_centers.partition_point(|&c| c < center - window);
        let hi = snap.sorted_centers.partition_point(|&c| c <= center + window);

        let mut sum = 0.0;
        let mut traces = Vec::new();

        for &j in &snap.order[lo..hi] {
            if j == i {
                continue;
            }
            let distance = (center - snap.centers[j]).abs();
            if distance > window {
                continue;
            }
            let distance_strength =
                scoring::hill_curve(distance, self.config.hill_tau, self.config.hill_steepness);
            let lexical = scoring::overlap(&snap.tokens[i], &snap.tokens[j]);
            let strength_ll = distance_strength * (1.0 + self.config.beta_lex_ll * lexical);
            let contrib = scoring::ensure_finite(strength_ll * snap.masses[j], || {
                format!("contrib {} -> {}", snap.ids[j], snap.ids[i])
            })?;

            sum += contrib;
            traces.push(NeighborEdgeTrace {
                from_id: snap.ids[j].clone(),
                to_id: snap.ids[i].clone(),
                strength_ll,
                contrib,
                distance,
                lexical,
            });
        }

        let boost = scoring::ensure_finite(self.config.lambda * sum, || {
            format!("boost for {}", snap.ids[i])
        })?;

        traces.sort_by(compare_contributors);
        traces.truncate(self.config.top_k_contrib);

        Ok(Reinforcement {
            boost,
            contributors: traces,
        })
    }
}

/// Contrib desc, then distance asc, then neighbor id asc.
fn compare_contributors(a: &NeighborEdgeTrace, b: &NeighborEdgeTrace) -> Ordering {
    b.contrib
        .total_cmp(&a.contrib)
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| a.from_id.cmp(&b.from_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::models::{Actor, CauseSide, Tier};

    fn singleton(anchor: usize, text: &str, mass: f64) -> GraphNode {
        GraphNode::singleton(
            CauseSide {
                text: text.to_string(),
                cause_type: "action".to_string(),
                anchor_index: anchor,
                mass,
                actor: Actor {
                    id: "p".to_string(),
                    name: "P".to_string(),
                },
            },
            &TierThresholds::default(),
        )
    }

    #[test]
    fn isolated_nodes_keep_their_mass() {
        let config = AnnealConfig {
            window_links: 5.0,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let mut nodes = vec![singleton(0, "a", 0.5), singleton(100, "b", 0.7)];
        let report = Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
        for node in &nodes {
            assert_eq!(node.mass_boost, 0.0);
            assert_eq!(node.mass, node.mass_base);
            assert!(node.top_contributors.is_empty());
        }
        assert_eq!(report.total_boost(), 0.0);
        assert_eq!(report.deltas[0].top_contributor_id, None);
    }

    #[test]
    fn boost_uses_prior_mass_of_neighbor() {
        let config = AnnealConfig {
            window_links: 10.0,
            hill_tau: 2.0,
            hill_steepness: 1.0,
            beta_lex_ll: 0.0,
            lambda: 1.0,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let mut nodes = vec![singleton(0, "x", 0.4), singleton(2, "y", 0.6)];
        Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
        // hill(2; tau=2, s=1) = 0.5
        assert!((nodes[0].mass_boost - 0.5 * 0.6).abs() < 1e-12);
        assert!((nodes[1].mass_boost - 0.5 * 0.4).abs() < 1e-12);
        assert_eq!(nodes[0].top_contributors[0].from_id, "r1-c2");
    }

    #[test]
    fn window_bound_is_inclusive() {
        let config = AnnealConfig {
            window_links: 4.0,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let mut nodes = vec![singleton(0, "x", 0.4), singleton(4, "y", 0.6)];
        Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
        assert!(nodes[0].mass_boost > 0.0);
    }

    #[test]
    fn top_k_truncates_and_orders_contributors() {
        let config = AnnealConfig {
            window_links: 50.0,
            top_k_contrib: 2,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let mut nodes = vec![
            singleton(10, "a", 0.5),
            singleton(11, "b", 0.5),
            singleton(13, "c", 0.5),
            singleton(20, "d", 0.5),
        ];
        Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
        let ids: Vec<&str> = nodes[0]
            .top_contributors
            .iter()
            .map(|t| t.from_id.as_str())
            .collect();
        assert_eq!(ids, vec!["r1-c11", "r1-c13"]);
    }

    #[test]
    fn tier_follows_boosted_mass() {
        let config = AnnealConfig {
            window_links: 10.0,
            lambda: 1.0,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let mut nodes = vec![singleton(0, "gate", 0.7), singleton(1, "gate", 0.7)];
        Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
        assert!(nodes[0].mass >= tiers.beat);
        assert_eq!(nodes[0].tier, tiers.classify(nodes[0].mass));
        assert_ne!(nodes[0].tier, Tier::Link);
    }
}
