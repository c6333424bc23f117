use crate::models::Actor;

/// Maps a speaker name to a known actor. Unmatched speakers never produce causes.
pub trait IActorResolver: Send + Sync {
    fn resolve(&self, speaker: &str) -> Option<Actor>;
}
