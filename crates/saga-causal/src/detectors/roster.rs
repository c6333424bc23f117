//! Fixed-roster actor resolution.

use rustc_hash::{FxHashMap, FxHashSet};
use saga_core::models::Actor;
use saga_core::traits::IActorResolver;

/// Speaker names that always belong to the narrator.
pub const DEFAULT_NARRATOR_NAMES: &[&str] = &["gm", "dm", "narrator", "game master", "dungeon master"];

/// Resolves speakers against a known list of players. Matching is
/// case-insensitive on either the actor's name or id; narrator names never
/// resolve.
pub struct RosterActorResolver {
    by_key: FxHashMap<String, Actor>,
    narrators: FxHashSet<String>,
    actor_count: usize,
}

impl RosterActorResolver {
    pub fn new(roster: Vec<Actor>) -> Self {
        let mut by_key = FxHashMap::default();
        let mut ids = FxHashSet::default();
        for actor in roster {
            ids.insert(actor.id.clone());
            by_key.insert(normalize(&actor.id), actor.clone());
            by_key.insert(normalize(&actor.name), actor);
        }
        Self {
            by_key,
            narrators: DEFAULT_NARRATOR_NAMES.iter().map(|n| normalize(n)).collect(),
            actor_count: ids.len(),
        }
    }

    /// Replace the narrator name list.
    pub fn with_narrators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.narrators = names.into_iter().map(|n| normalize(n.as_ref())).collect();
        self
    }

    /// Number of distinct actors on the roster.
    pub fn len(&self) -> usize {
        self.actor_count
    }

    pub fn is_empty(&self) -> bool {
        self.actor_count == 0
    }
}

impl IActorResolver for RosterActorResolver {
    fn resolve(&self, speaker: &str) -> Option<Actor> {
        let key = normalize(speaker);
        if key.is_empty() || self.narrators.contains(&key) {
            return None;
        }
        self.by_key.get(&key).cloned()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
