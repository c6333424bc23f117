//! petgraph view of the hierarchy: composite → member edges across all rounds.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use petgraph::Direction;
use rustc_hash::FxHashMap;
use saga_core::errors::CausalError;
use saga_core::models::{GraphNode, NodeKind};

/// A node of the hierarchy graph. Carried nodes appear once, at the round
/// they were created.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyVertex {
    pub id: String,
    pub kind: NodeKind,
    pub level: u32,
}

/// Edge weight: slot of the member inside its composite (0 or 1).
pub type MemberSlot = u8;

pub struct HierarchyGraph {
    pub graph: DiGraph<HierarchyVertex, MemberSlot>,
    node_index: FxHashMap<String, NodeIndex>,
}

impl HierarchyGraph {
    /// Build the graph from per-round node sets, earliest round first.
    /// Every composite member must already exist in an earlier round.
    pub fn from_rounds<'a, I>(rounds: I) -> Result<Self, CausalError>
    where
        I: IntoIterator<Item = &'a [GraphNode]>,
    {
        let mut hierarchy = Self {
            graph: DiGraph::new(),
            node_index: FxHashMap::default(),
        };

        for nodes in rounds {
            for node in nodes {
                if hierarchy.node_index.contains_key(&node.id) {
                    continue;
                }
                let members = match &node.members {
                    Some(members) => {
                        let mut resolved = [NodeIndex::end(); 2];
                        for (slot, member) in members.iter().enumerate() {
                            resolved[slot] = hierarchy.get_node(member).ok_or_else(|| {
                                CausalError::UnknownMember { id: member.clone() }
                            })?;
                        }
                        Some(resolved)
                    }
                    None if node.kind == NodeKind::Composite => {
                        return Err(CausalError::GraphInconsistency {
                            details: format!("composite {} has no members", node.id),
                        });
                    }
                    None => None,
                };

                let idx = hierarchy.graph.add_node(HierarchyVertex {
                    id: node.id.clone(),
                    kind: node.kind,
                    level: node.level,
                });
                hierarchy.node_index.insert(node.id.clone(), idx);

                if let Some(members) = members {
                    for (slot, member) in members.into_iter().enumerate() {
                        hierarchy.graph.add_edge(idx, member, slot as MemberSlot);
                    }
                }
            }
        }

        Ok(hierarchy)
    }

    pub fn get_node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Member ids of a composite in slot order. Empty for leaves.
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        let Some(idx) = self.get_node(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_by_key(|(slot, _)| *slot);
        edges
            .into_iter()
            .map(|(_, target)| self.graph[target].id.as_str())
            .collect()
    }

    /// The composite that absorbed `id`, if any.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let idx = self.get_node(id)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(|parent| self.graph[parent].id.as_str())
    }

    /// Leaf ids under `id`, sorted. A leaf resolves to itself.
    pub fn leaves_of(&self, id: &str) -> Option<Vec<String>> {
        let start = self.get_node(id)?;
        let mut leaves = Vec::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            let vertex = &self.graph[idx];
            if vertex.kind != NodeKind::Composite {
                leaves.push(vertex.id.clone());
            }
        }
        leaves.sort();
        Some(leaves)
    }

    /// Ids of nodes no composite absorbed, sorted.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].id.as_str())
            .collect();
        roots.sort_unstable();
        roots
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::config::{MassCombination, TierThresholds};
    use saga_core::models::{Actor, CauseSide, JoinInfo};

    fn leaf(anchor: usize) -> GraphNode {
        GraphNode::singleton(
            CauseSide {
                text: format!("line {anchor}"),
                cause_type: "action".to_string(),
                anchor_index: anchor,
                mass: 0.3,
                actor: Actor {
                    id: "p".to_string(),
                    name: "P".to_string(),
                },
            },
            &TierThresholds::default(),
        )
    }

    fn merge(id: &str, level: u32, a: &GraphNode, b: &GraphNode) -> GraphNode {
        GraphNode::composite(
            id.to_string(),
            level,
            a,
            b,
            0.5,
            JoinInfo {
                join_center_distance: 1.0,
                join_lexical_score: 0.0,
            },
            MassCombination::Sum,
            &TierThresholds::default(),
        )
    }

    #[test]
    fn resolves_leaves_and_parents_across_rounds() {
        let (a, b, c) = (leaf(1), leaf(2), leaf(8));
        let round1 = vec![a.clone(), b.clone(), c.clone()];
        let ab = merge("r2-n0", 2, &a, &b);
        let round2 = vec![ab.clone(), c.clone()];
        let abc = merge("r3-n0", 3, &ab, &c);
        let round3 = vec![abc];

        let graph =
            HierarchyGraph::from_rounds([round1.as_slice(), round2.as_slice(), round3.as_slice()])
                .unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(
            graph.leaves_of("r3-n0").unwrap(),
            vec!["r1-c1", "r1-c2", "r1-c8"]
        );
        assert_eq!(graph.leaves_of("r1-c8").unwrap(), vec!["r1-c8"]);
        assert_eq!(graph.parent_of("r1-c1"), Some("r2-n0"));
        assert_eq!(graph.parent_of("r1-c8"), Some("r3-n0"));
        assert_eq!(graph.parent_of("r3-n0"), None);
        assert_eq!(graph.children_of("r2-n0"), vec!["r1-c1", "r1-c2"]);
        assert_eq!(graph.roots(), vec!["r3-n0"]);
    }

    #[test]
    fn unknown_member_is_rejected() {
        let (a, b) = (leaf(1), leaf(2));
        let ab = merge("r2-n0", 2, &a, &b);
        let round1 = vec![a];
        let round2 = vec![ab];
        let err = HierarchyGraph::from_rounds([round1.as_slice(), round2.as_slice()])
            .err()
            .unwrap();
        assert!(matches!(err, CausalError::UnknownMember { id } if id == "r1-c2"));
    }
}
