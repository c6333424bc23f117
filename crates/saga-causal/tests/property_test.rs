//! Property tests: exclusivity, determinism, distance monotonicity of
//! `strength_ce` and `strength_ll`, mass non-negativity, tier monotonicity,
//! boost locality.

mod common;

use common::{player, Script};
use proptest::prelude::*;
use rustc_hash::FxHashSet;
use saga_causal::candidates::CandidateGenerator;
use saga_causal::detection::DetectedLine;
use saga_causal::scoring::hill_curve;
use saga_causal::Annealer;
use saga_core::config::{AnnealConfig, CandidateConfig, EngineConfig, TierThresholds};
use saga_core::models::{CauseDetection, CauseSide, EffectDetection, GraphNode, NodeKind};
use saga_core::traits::NoAnswerMatcher;

const WORDS: &[&str] = &["door", "torch", "guard", "vault", "river", "bridge", "sword", "map"];

/// Line kinds: 0 = filler, 1 = cause, 2 = effect.
fn script_from(kinds: &[(u8, usize, u8)]) -> Script {
    let mut script = Script::new();
    for (position, &(kind, word, mass)) in kinds.iter().enumerate() {
        let index = position * 2;
        let mass = f64::from(mass) / 10.0;
        let noun = WORDS[word % WORDS.len()];
        script = match kind {
            1 => script.cause(index, "Aria", &format!("look at the {noun} {index}"), "question", mass),
            2 => script.effect(index, &format!("the {noun} glows {index}"), "information", mass),
            _ => script.filler(index..=index),
        };
    }
    script
}

fn transcript_strategy() -> impl Strategy<Value = Vec<(u8, usize, u8)>> {
    prop::collection::vec((0u8..3, 0usize..8, 0u8..=10), 1..40)
}

// =============================================================================
// Exclusivity: no two links share a cause or an effect
// =============================================================================
proptest! {
    #[test]
    fn links_are_one_to_one(kinds in transcript_strategy()) {
        let script = script_from(&kinds);
        let (lines, mask) = script.transcript();
        let result = script.engine(EngineConfig::default()).run(&lines, &mask).unwrap();

        let mut causes = FxHashSet::default();
        let mut effects = FxHashSet::default();
        for node in result.leaves() {
            prop_assert!(causes.insert(node.cause_anchor_index().unwrap()));
            if node.kind == NodeKind::Link {
                prop_assert!(effects.insert(node.effect_anchor_index().unwrap()));
            } else {
                prop_assert!(node.effect_anchor_index().is_none());
            }
        }
        for effect in &result.unclaimed_effects {
            prop_assert!(!effects.contains(effect));
        }
    }
}

// =============================================================================
// Determinism: identical inputs give identical node sets and fingerprints
// =============================================================================
proptest! {
    #[test]
    fn runs_are_deterministic(kinds in transcript_strategy()) {
        let script = script_from(&kinds);
        let (lines, mask) = script.transcript();
        let engine = script.engine(EngineConfig::default());
        let first = engine.run(&lines, &mask).unwrap();
        let second = engine.run(&lines, &mask).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
    }
}

// =============================================================================
// Mass non-negativity and tier as a function of mass, in every round
// =============================================================================
proptest! {
    #[test]
    fn mass_never_below_base(kinds in transcript_strategy()) {
        let script = script_from(&kinds);
        let (lines, mask) = script.transcript();
        let config = EngineConfig::default();
        let tiers = config.tiers.clone();
        let result = script.engine(config).run(&lines, &mask).unwrap();
        for snapshot in &result.rounds {
            for node in &snapshot.nodes {
                prop_assert!(node.mass_base >= 0.0);
                prop_assert!(node.mass_boost >= 0.0);
                prop_assert!(node.mass >= node.mass_base);
                prop_assert_eq!(node.tier, tiers.classify(node.mass));
                prop_assert!(node.mass.is_finite());
            }
        }
    }
}

proptest! {
    #[test]
    fn tier_is_monotone_in_mass(a in 0.0f64..5.0, b in 0.0f64..5.0) {
        let tiers = TierThresholds::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tiers.classify(low) <= tiers.classify(high));
    }
}

// =============================================================================
// Distance monotonicity of strength_ce and of the shared curve
// =============================================================================
fn pair_strength(distance: usize) -> f64 {
    let config = CandidateConfig {
        k_local: 1,
        ..Default::default()
    };
    let matcher = NoAnswerMatcher;
    let lines = vec![
        DetectedLine {
            position: 0,
            index: 0,
            text: "alpha".to_string(),
            cause: Some((CauseDetection::detected("question", 0.5), player("Aria"))),
            effect: None,
        },
        DetectedLine {
            position: 1,
            index: distance,
            text: "omega".to_string(),
            cause: None,
            effect: Some(EffectDetection::detected("information", 0.5)),
        },
    ];
    let candidates = CandidateGenerator::new(&config, &matcher)
        .generate(&lines)
        .unwrap();
    candidates[0].strength_ce
}

proptest! {
    #[test]
    fn strength_decreases_with_distance(d1 in 1usize..200, gap in 1usize..50) {
        let d2 = d1 + gap;
        prop_assert!(pair_strength(d1) > pair_strength(d2));
        prop_assert!(hill_curve(d1 as f64, 6.0, 2.0) > hill_curve(d2 as f64, 6.0, 2.0));
    }
}

/// Boost and `strength_ll` received by a node from one neighbor `distance`
/// lines away. Text and masses are held fixed.
fn neighbor_pull(distance: usize, window: f64) -> (f64, Option<f64>) {
    let config = AnnealConfig {
        window_links: window,
        ..Default::default()
    };
    let tiers = TierThresholds::default();
    let mut nodes = vec![isolated(0, 0.5), isolated(distance, 0.5)];
    Annealer::new(&config, &tiers).anneal(&mut nodes).unwrap();
    let strength = nodes[0].top_contributors.first().map(|t| t.strength_ll);
    (nodes[0].mass_boost, strength)
}

const PULL_WINDOW: f64 = 60.0;

proptest! {
    #[test]
    fn neighbor_strength_decreases_with_distance(d1 in 1usize..60, gap in 1usize..30) {
        let d2 = (d1 + gap).min(PULL_WINDOW as usize);
        prop_assume!(d2 > d1);
        let (near_boost, near_strength) = neighbor_pull(d1, PULL_WINDOW);
        let (far_boost, far_strength) = neighbor_pull(d2, PULL_WINDOW);
        prop_assert!(near_boost > far_boost);
        prop_assert!(far_boost > 0.0);
        prop_assert!(near_strength.unwrap() > far_strength.unwrap());
    }

    #[test]
    fn neighbor_beyond_window_contributes_nothing(beyond in 1usize..100) {
        let (boost, strength) = neighbor_pull(PULL_WINDOW as usize + beyond, PULL_WINDOW);
        prop_assert_eq!(boost, 0.0);
        prop_assert!(strength.is_none());
    }
}

// =============================================================================
// Boost locality and idempotent re-anneal on isolated node sets
// =============================================================================
fn isolated(anchor: usize, mass: f64) -> GraphNode {
    GraphNode::singleton(
        CauseSide {
            text: "the same words everywhere".to_string(),
            cause_type: "action".to_string(),
            anchor_index: anchor,
            mass,
            actor: player("Aria"),
        },
        &TierThresholds::default(),
    )
}

proptest! {
    #[test]
    fn isolated_nodes_get_no_boost(
        masses in prop::collection::vec(0.0f64..1.0, 1..20),
        window in 1usize..30,
    ) {
        let config = AnnealConfig {
            window_links: window as f64,
            ..Default::default()
        };
        let tiers = TierThresholds::default();
        let spacing = window + 1;
        let mut nodes: Vec<GraphNode> = masses
            .iter()
            .enumerate()
            .map(|(i, &m)| isolated(i * spacing, m))
            .collect();
        let before = nodes.clone();

        let annealer = Annealer::new(&config, &tiers);
        annealer.anneal(&mut nodes).unwrap();
        annealer.anneal(&mut nodes).unwrap();

        for (node, original) in nodes.iter().zip(&before) {
            prop_assert_eq!(node.mass_boost, 0.0);
            prop_assert_eq!(node.mass, node.mass_base);
            prop_assert_eq!(node.mass, original.mass);
            prop_assert!(node.top_contributors.is_empty());
        }
    }
}
