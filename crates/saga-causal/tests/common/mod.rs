//! Deterministic test strategies: detections are looked up by exact line text.

#![allow(dead_code)]

use std::collections::HashMap;

use saga_causal::CausalHierarchyEngine;
use saga_core::config::EngineConfig;
use saga_core::errors::DetectionError;
use saga_core::models::{Actor, CauseDetection, EffectDetection, EligibilityMask, TranscriptLine};
use saga_core::traits::{IActorResolver, ICauseDetector, IEffectDetector};

pub const NARRATOR: &str = "GM";

pub struct TableCauseDetector(pub HashMap<String, CauseDetection>);

impl ICauseDetector for TableCauseDetector {
    fn detect_cause(&self, text: &str) -> Result<CauseDetection, DetectionError> {
        Ok(self.0.get(text).cloned().unwrap_or_else(CauseDetection::none))
    }

    fn name(&self) -> &str {
        "table-cause"
    }
}

pub struct TableEffectDetector(pub HashMap<String, EffectDetection>);

impl IEffectDetector for TableEffectDetector {
    fn detect_effect(&self, text: &str) -> Result<EffectDetection, DetectionError> {
        Ok(self.0.get(text).cloned().unwrap_or_else(EffectDetection::none))
    }

    fn name(&self) -> &str {
        "table-effect"
    }
}

/// Every speaker except the narrator is a player.
pub struct AnyPlayer;

impl IActorResolver for AnyPlayer {
    fn resolve(&self, speaker: &str) -> Option<Actor> {
        (speaker != NARRATOR).then(|| Actor {
            id: speaker.to_lowercase(),
            name: speaker.to_string(),
        })
    }
}

/// Transcript builder with scripted detections.
#[derive(Default)]
pub struct Script {
    pub lines: Vec<TranscriptLine>,
    causes: HashMap<String, CauseDetection>,
    effects: HashMap<String, EffectDetection>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cause(mut self, index: usize, speaker: &str, text: &str, kind: &str, mass: f64) -> Self {
        self.lines.push(TranscriptLine::new(index, speaker, text));
        self.causes
            .insert(text.to_string(), CauseDetection::detected(kind, mass));
        self
    }

    pub fn effect(mut self, index: usize, text: &str, kind: &str, mass: f64) -> Self {
        self.lines.push(TranscriptLine::new(index, NARRATOR, text));
        self.effects
            .insert(text.to_string(), EffectDetection::detected(kind, mass));
        self
    }

    /// Undetected narrator lines for every index in `range`.
    pub fn filler(mut self, range: std::ops::RangeInclusive<usize>) -> Self {
        for index in range {
            self.lines
                .push(TranscriptLine::new(index, NARRATOR, format!("filler {index}")));
        }
        self
    }

    pub fn engine(&self, config: EngineConfig) -> CausalHierarchyEngine {
        CausalHierarchyEngine::new(
            config,
            Box::new(TableCauseDetector(self.causes.clone())),
            Box::new(TableEffectDetector(self.effects.clone())),
            Box::new(AnyPlayer),
        )
        .unwrap()
    }

    /// Lines sorted by index with an all-eligible mask.
    pub fn transcript(&self) -> (Vec<TranscriptLine>, EligibilityMask) {
        let mut lines = self.lines.clone();
        lines.sort_by_key(|l| l.index);
        let mask = EligibilityMask::all_eligible(lines.len());
        (lines, mask)
    }
}

pub fn player(name: &str) -> Actor {
    Actor {
        id: name.to_lowercase(),
        name: name.to_string(),
    }
}
