//! Searching for chord paths from a start chord to a target chord.
//!
//! Two strategies, tried in order:
//! - direct: backward walks from the target, kept when they happen to
//!   begin on the start chord.
//! - common tone: a short backward walk into the target, joined to a
//!   second walk that ends on a bridge chord harmonically close to where
//!   the first one begins.
//!
//! Both run in bounded rounds. Running out of rounds is not an error; the
//! caller gets an empty result and decides what to tell the user.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::canonical::CanonicalIndex;
use crate::graph::TransitionGraph;
use crate::similarity::{self, find_similar};
use crate::walk::build_backward_path;

/// How hard the planner tries before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModulationBudget {
    /// Rounds per strategy.
    pub rounds: usize,
    /// Paths generated per round.
    pub attempts: usize,
    /// Minimum similarity for a bridge chord.
    pub similarity_threshold: f64,
}

impl Default for ModulationBudget {
    fn default() -> Self {
        Self {
            rounds: 10,
            attempts: 10,
            similarity_threshold: similarity::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulationStrategy {
    Direct,
    CommonTone,
}

impl ModulationStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::CommonTone => "common tone",
        }
    }
}

/// Paths accepted by the planner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modulation {
    pub paths: Vec<Vec<String>>,
    /// `None` when both strategies ran out of rounds.
    pub strategy: Option<ModulationStrategy>,
    /// Total rounds spent across both strategies.
    pub rounds_used: usize,
}

impl Modulation {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

pub struct ModulationPlanner<'a> {
    graph: &'a TransitionGraph,
    index: &'a CanonicalIndex,
    budget: ModulationBudget,
}

impl<'a> ModulationPlanner<'a> {
    pub fn new(graph: &'a TransitionGraph, index: &'a CanonicalIndex, budget: ModulationBudget) -> Self {
        ModulationPlanner {
            graph,
            index,
            budget,
        }
    }

    pub fn budget(&self) -> &ModulationBudget {
        &self.budget
    }

    /// `attempts` independent backward walks ending on `target`.
    pub fn direct_modulation_paths<R: Rng + ?Sized>(
        &self,
        target: &str,
        length: usize,
        attempts: usize,
        rng: &mut R,
    ) -> Vec<Vec<String>> {
        (0..attempts)
            .map(|_| build_backward_path(target, length, self.graph, rng))
            .collect()
    }

    /// Up to `attempts` two-part paths ending on `target`.
    ///
    /// The tail (`length / 2` chords) walks back from `target`. A bridge
    /// chord similar to the tail's first chord is picked at random, and the
    /// head (the remaining chords) walks back from the bridge. The two
    /// parts are concatenated as-is, so the bridge and the tail's first
    /// chord both appear. Attempts with no bridge candidate produce nothing.
    pub fn common_tone_modulation_paths<R: Rng + ?Sized>(
        &self,
        target: &str,
        length: usize,
        attempts: usize,
        rng: &mut R,
    ) -> Vec<Vec<String>> {
        let tail_len = length / 2;
        let head_len = length - tail_len;
        let mut paths = Vec::with_capacity(attempts);

        for _ in 0..attempts {
            let tail = build_backward_path(target, tail_len, self.graph, rng);
            let pivot = &tail[0];

            let candidates = find_similar(pivot, self.index, self.budget.similarity_threshold, rng);
            let Some(bridge) = candidates.choose(rng) else {
                log::trace!("No bridge chord similar to {pivot}");
                continue;
            };

            let mut path = build_backward_path(bridge, head_len, self.graph, rng);
            path.extend(tail);
            paths.push(path);
        }

        paths
    }

    /// Find paths of `length` chords that start on `start` and end on
    /// `target`.
    ///
    /// Direct walks are tried first; a direct path only needs to begin on
    /// `start`. Common-tone paths run only if no direct round succeeded,
    /// and must also be exactly `length` long, since either half may have
    /// stopped short. Each strategy returns the accepted paths of its first
    /// successful round.
    pub fn build_modulation<R: Rng + ?Sized>(
        &self,
        start: &str,
        target: &str,
        length: usize,
        rng: &mut R,
    ) -> Modulation {
        let mut rounds_used = 0;

        for round in 1..=self.budget.rounds {
            rounds_used += 1;
            let accepted: Vec<Vec<String>> = self
                .direct_modulation_paths(target, length, self.budget.attempts, rng)
                .into_iter()
                .filter(|p| p.first().map(String::as_str) == Some(start))
                .collect();
            if !accepted.is_empty() {
                log::debug!(
                    "Direct modulation {start} -> {target}: {} paths in round {round}",
                    accepted.len()
                );
                return Modulation {
                    paths: accepted,
                    strategy: Some(ModulationStrategy::Direct),
                    rounds_used,
                };
            }
        }
        log::debug!("No direct modulation {start} -> {target}, trying common tones");

        for round in 1..=self.budget.rounds {
            rounds_used += 1;
            let accepted: Vec<Vec<String>> = self
                .common_tone_modulation_paths(target, length, self.budget.attempts, rng)
                .into_iter()
                .filter(|p| p.len() == length && p.first().map(String::as_str) == Some(start))
                .collect();
            if !accepted.is_empty() {
                log::debug!(
                    "Common-tone modulation {start} -> {target}: {} paths in round {round}",
                    accepted.len()
                );
                return Modulation {
                    paths: accepted,
                    strategy: Some(ModulationStrategy::CommonTone),
                    rounds_used,
                };
            }
        }

        log::debug!("No modulation {start} -> {target} after {rounds_used} rounds");
        Modulation {
            paths: Vec::new(),
            strategy: None,
            rounds_used,
        }
    }
}
