//! GraphNode: the unit produced at every hierarchy level.

use serde::{Deserialize, Serialize};

use super::{Actor, NeighborEdgeTrace, Tier};
use crate::config::{MassCombination, TierThresholds};

/// Level assigned to leaf nodes.
pub const LEAF_LEVEL: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A cause with no allocated effect.
    Singleton,
    /// A claimed cause+effect pair.
    Link,
    /// A merge of exactly two lower-level nodes.
    Composite,
}

/// The cause half of a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseSide {
    pub text: String,
    pub cause_type: String,
    pub anchor_index: usize,
    pub mass: f64,
    pub actor: Actor,
}

/// The effect half of a claimed leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSide {
    pub text: String,
    pub effect_type: String,
    pub anchor_index: usize,
    pub mass: f64,
    pub distance: usize,
    /// `strength_ce` of the winning candidate.
    pub score: f64,
}

/// How two children were joined into a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinInfo {
    pub join_center_distance: f64,
    pub join_lexical_score: f64,
}

/// A node of the causal hierarchy.
///
/// Mass and tier are only changed through [`GraphNode::set_mass`], which keeps
/// `tier` a function of the current `mass`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub level: u32,
    /// Exactly two child ids for composites.
    pub members: Option<[String; 2]>,
    pub span_start_index: usize,
    pub span_end_index: usize,
    pub center_index: f64,
    pub mass_base: f64,
    pub mass_boost: f64,
    pub mass: f64,
    pub link_mass: f64,
    pub strength_internal: f64,
    pub strength_bridge: f64,
    pub tier: Tier,
    pub claimed: bool,
    pub cause: Option<CauseSide>,
    pub effect: Option<EffectSide>,
    pub join: Option<JoinInfo>,
    /// Narrative text used for lexical signals (cause + effect, or both children).
    pub text: String,
    /// Eligible lines strictly inside the span, when recorded.
    pub context_text: String,
    pub top_contributors: Vec<NeighborEdgeTrace>,
}

impl GraphNode {
    /// Deterministic id of the leaf anchored at `cause_index`.
    pub fn leaf_id(cause_index: usize) -> String {
        format!("r1-c{cause_index}")
    }

    /// A claimed cause+effect pair.
    /// `mass_base = cause_mass + effect_mass + strength`.
    pub fn link(
        cause: CauseSide,
        effect: EffectSide,
        context_text: String,
        tiers: &TierThresholds,
    ) -> Self {
        let strength = effect.score;
        let start = cause.anchor_index.min(effect.anchor_index);
        let end = cause.anchor_index.max(effect.anchor_index);
        let mass_base = cause.mass + effect.mass + strength;
        let text = format!("{} {}", cause.text, effect.text);
        let mut node = Self {
            id: Self::leaf_id(cause.anchor_index),
            kind: NodeKind::Link,
            level: LEAF_LEVEL,
            members: None,
            span_start_index: start,
            span_end_index: end,
            center_index: midpoint(start, end),
            mass_base: 0.0,
            mass_boost: 0.0,
            mass: 0.0,
            link_mass: 0.0,
            strength_internal: strength,
            strength_bridge: strength,
            tier: Tier::Link,
            claimed: true,
            cause: Some(cause),
            effect: Some(effect),
            join: None,
            text,
            context_text,
            top_contributors: Vec::new(),
        };
        node.set_mass(mass_base, 0.0, tiers);
        node
    }

    /// An unclaimed cause. `mass_base = cause_mass`.
    pub fn singleton(cause: CauseSide, tiers: &TierThresholds) -> Self {
        let anchor = cause.anchor_index;
        let mass_base = cause.mass;
        let text = cause.text.clone();
        let mut node = Self {
            id: Self::leaf_id(anchor),
            kind: NodeKind::Singleton,
            level: LEAF_LEVEL,
            members: None,
            span_start_index: anchor,
            span_end_index: anchor,
            center_index: anchor as f64,
            mass_base: 0.0,
            mass_boost: 0.0,
            mass: 0.0,
            link_mass: 0.0,
            strength_internal: 0.0,
            strength_bridge: 0.0,
            tier: Tier::Link,
            claimed: false,
            cause: Some(cause),
            effect: None,
            join: None,
            text,
            context_text: String::new(),
            top_contributors: Vec::new(),
        };
        node.set_mass(mass_base, 0.0, tiers);
        node
    }

    /// Merge two nodes into a composite at `level`.
    /// Children are ordered by span so `members[0]` is the earlier one.
    #[allow(clippy::too_many_arguments)]
    pub fn composite(
        id: String,
        level: u32,
        left: &GraphNode,
        right: &GraphNode,
        bridge: f64,
        join: JoinInfo,
        combination: MassCombination,
        tiers: &TierThresholds,
    ) -> Self {
        let (first, second) = if (left.span_start_index, left.span_end_index, &left.id)
            <= (right.span_start_index, right.span_end_index, &right.id)
        {
            (left, right)
        } else {
            (right, left)
        };
        let start = first.span_start_index.min(second.span_start_index);
        let end = first.span_end_index.max(second.span_end_index);
        let mass_base = combination.combine(first.mass, second.mass);
        let context_text = join_text(&first.context_text, &second.context_text);
        let mut node = Self {
            id,
            kind: NodeKind::Composite,
            level,
            members: Some([first.id.clone(), second.id.clone()]),
            span_start_index: start,
            span_end_index: end,
            center_index: midpoint(start, end),
            mass_base: 0.0,
            mass_boost: 0.0,
            mass: 0.0,
            link_mass: 0.0,
            strength_internal: bridge,
            strength_bridge: bridge,
            tier: Tier::Link,
            claimed: false,
            cause: None,
            effect: None,
            join: Some(join),
            text: join_text(&first.text, &second.text),
            context_text,
            top_contributors: Vec::new(),
        };
        node.set_mass(mass_base, 0.0, tiers);
        node
    }

    /// Set base and boost, then derive `mass`, `link_mass` and `tier`.
    /// Negative or non-finite inputs are clamped to zero.
    pub fn set_mass(&mut self, mass_base: f64, mass_boost: f64, tiers: &TierThresholds) {
        self.mass_base = non_negative(mass_base);
        self.mass_boost = non_negative(mass_boost);
        self.mass = self.mass_base + self.mass_boost;
        self.link_mass = self.mass;
        self.tier = tiers.classify(self.mass);
    }

    /// Re-derive `center_index` from the current span.
    pub fn recenter(&mut self) {
        self.center_index = midpoint(self.span_start_index, self.span_end_index);
    }

    pub fn is_leaf(&self) -> bool {
        self.kind != NodeKind::Composite
    }

    pub fn cause_anchor_index(&self) -> Option<usize> {
        self.cause.as_ref().map(|c| c.anchor_index)
    }

    pub fn effect_anchor_index(&self) -> Option<usize> {
        self.effect.as_ref().map(|e| e.anchor_index)
    }

    /// Text fed to the lexical signal, optionally with in-between context.
    pub fn lexical_text(&self, include_context: bool) -> String {
        if include_context && !self.context_text.is_empty() {
            join_text(&self.text, &self.context_text)
        } else {
            self.text.clone()
        }
    }
}

fn midpoint(start: usize, end: usize) -> f64 {
    (start as f64 + end as f64) / 2.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn join_text(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}
