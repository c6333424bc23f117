//! CausalHierarchyEngine: validation → detection → candidates → allocation →
//! anneal → composition rounds.

use saga_core::config::EngineConfig;
use saga_core::errors::{ConfigError, SagaResult};
use saga_core::models::{Actor, EligibilityMask, NodeKind, TranscriptLine};
use saga_core::traits::{IActorResolver, IAnswerMatcher, ICauseDetector, IEffectDetector};
use tracing::{debug, info, info_span};

use crate::allocation::allocate;
use crate::anneal::Annealer;
use crate::candidates::CandidateGenerator;
use crate::detection::{detect_lines, validate_inputs};
use crate::detectors::{KeywordCauseDetector, KeywordEffectDetector, RosterActorResolver, YesNoAnswerMatcher};
use crate::hierarchy::Composer;
use crate::result::{HierarchyResult, RoundSnapshot};

/// Runs the full hierarchy computation over one transcript.
///
/// The engine holds no per-run state: every call to [`run`](Self::run) works
/// on its own node sets, so one engine can serve many transcripts.
pub struct CausalHierarchyEngine {
    config: EngineConfig,
    cause_detector: Box<dyn ICauseDetector>,
    effect_detector: Box<dyn IEffectDetector>,
    actor_resolver: Box<dyn IActorResolver>,
    answer_matcher: Box<dyn IAnswerMatcher>,
}

impl CausalHierarchyEngine {
    /// Create an engine with injected strategies. The configuration is
    /// validated here so a bad parameter never reaches the scoring loops.
    pub fn new(
        config: EngineConfig,
        cause_detector: Box<dyn ICauseDetector>,
        effect_detector: Box<dyn IEffectDetector>,
        actor_resolver: Box<dyn IActorResolver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cause_detector,
            effect_detector,
            actor_resolver,
            answer_matcher: Box::new(YesNoAnswerMatcher::new()),
        })
    }

    /// Engine wired with the keyword detectors and a fixed roster of players.
    pub fn heuristic(config: EngineConfig, roster: Vec<Actor>) -> Result<Self, ConfigError> {
        Self::new(
            config,
            Box::new(KeywordCauseDetector::new()),
            Box::new(KeywordEffectDetector::new()),
            Box::new(RosterActorResolver::new(roster)),
        )
    }

    /// Replace the yes/no answer matcher.
    pub fn with_answer_matcher(mut self, answer_matcher: Box<dyn IAnswerMatcher>) -> Self {
        self.answer_matcher = answer_matcher;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the hierarchy for `lines` under `mask`.
    ///
    /// Input contract violations fail before any scoring. The returned result
    /// holds one annealed snapshot per round, `hierarchy.rounds` in total.
    pub fn run(&self, lines: &[TranscriptLine], mask: &EligibilityMask) -> SagaResult<HierarchyResult> {
        let _run = info_span!("saga.run", lines = lines.len()).entered();

        validate_inputs(lines, mask)?;

        let detected = detect_lines(
            lines,
            mask,
            self.cause_detector.as_ref(),
            self.effect_detector.as_ref(),
            self.actor_resolver.as_ref(),
        )?;
        info!(
            eligible = detected.len(),
            causes = detected.iter().filter(|l| l.is_cause()).count(),
            effects = detected.iter().filter(|l| l.is_effect()).count(),
            cause_detector = self.cause_detector.name(),
            effect_detector = self.effect_detector.name(),
            "detection complete"
        );

        let candidates = CandidateGenerator::new(&self.config.candidates, self.answer_matcher.as_ref())
            .generate(&detected)?;
        let candidates_considered = candidates.len();

        let allocation = {
            let _span = info_span!("saga.allocation", candidates = candidates_considered).entered();
            allocate(&detected, candidates, &self.config.tiers)
        };
        info!(
            links = allocation.nodes.iter().filter(|n| n.kind == NodeKind::Link).count(),
            singletons = allocation.nodes.iter().filter(|n| n.kind == NodeKind::Singleton).count(),
            unclaimed_effects = allocation.unclaimed_effects.len(),
            "allocation complete"
        );

        let annealer = Annealer::new(&self.config.anneal, &self.config.tiers);
        let mut leaves = allocation.nodes;
        let report = {
            let _span = info_span!("saga.anneal", round = 1u32, nodes = leaves.len()).entered();
            annealer.anneal(&mut leaves)?
        };
        debug!(round = 1u32, total_boost = report.total_boost(), "round annealed");

        let mut rounds = vec![RoundSnapshot {
            round: 1,
            nodes: leaves,
            deltas: report.deltas,
            merged: 0,
            carried: 0,
        }];

        let composer = Composer::new(
            &self.config.hierarchy,
            &self.config.tiers,
            self.config.anneal.include_context,
        );
        for round in 2..=self.config.hierarchy.rounds {
            let Some(previous) = rounds.last() else {
                break;
            };
            let _span = info_span!("saga.compose", round).entered();
            let outcome = composer.compose(round, &previous.nodes)?;
            let mut nodes = outcome.nodes;
            let report = annealer.anneal(&mut nodes)?;
            debug!(
                round,
                nodes = nodes.len(),
                merged = outcome.merged,
                carried = outcome.carried,
                total_boost = report.total_boost(),
                "round annealed"
            );
            rounds.push(RoundSnapshot {
                round,
                nodes,
                deltas: report.deltas,
                merged: outcome.merged,
                carried: outcome.carried,
            });
        }

        let result = HierarchyResult {
            rounds,
            allocation_trace: allocation.trace,
            unclaimed_effects: allocation.unclaimed_effects,
            candidates_considered,
        };

        // Every composite member must resolve to a node of an earlier round.
        result.graph()?;

        let summary = result.summary();
        if let Some(last) = summary.rounds.last() {
            info!(
                rounds = summary.rounds.len(),
                final_nodes = last.nodes,
                composites = last.composites,
                total_mass = last.total_mass,
                candidates = summary.candidates_considered,
                "hierarchy complete"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::errors::SagaError;

    fn roster() -> Vec<Actor> {
        vec![Actor {
            id: "aria".to_string(),
            name: "Aria".to_string(),
        }]
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = EngineConfig::default();
        config.candidates.k_local = 0;
        assert!(CausalHierarchyEngine::heuristic(config, roster()).is_err());
    }

    #[test]
    fn mask_shorter_than_transcript_fails_fast() {
        let engine = CausalHierarchyEngine::heuristic(EngineConfig::default(), roster()).unwrap();
        let lines = vec![
            TranscriptLine::new(0, "Aria", "Can I look around?"),
            TranscriptLine::new(1, "GM", "You see a door."),
        ];
        let err = engine
            .run(&lines, &EligibilityMask::all_eligible(1))
            .unwrap_err();
        assert!(matches!(err, SagaError::Transcript(_)));
    }

    #[test]
    fn empty_transcript_yields_empty_rounds() {
        let engine = CausalHierarchyEngine::heuristic(EngineConfig::default(), roster()).unwrap();
        let result = engine.run(&[], &EligibilityMask::all_eligible(0)).unwrap();
        assert_eq!(result.rounds.len(), engine.config().hierarchy.rounds as usize);
        assert!(result.final_nodes().is_empty());
    }
}
