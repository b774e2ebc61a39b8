//! Forward and backward chord-transition counts over a corpus.
//!
//! Edges carry multiplicities. Probabilities are never stored; the
//! frequency helpers divide by the total on demand.

use std::collections::{BTreeMap, BTreeSet};

use crate::canonical::CanonicalIndex;
use crate::catalog::{Progression, ProgressionKind};

/// Neighbor label → number of times the transition was seen.
pub type Counts = BTreeMap<String, u32>;

/// An ordered (from, to) pair, used only as a counting key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChordPair {
    pub from: String,
    pub to: String,
}

impl ChordPair {
    pub fn new(from: &str, to: &str) -> Self {
        ChordPair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    forward: BTreeMap<String, Counts>,
    backward: BTreeMap<String, Counts>,
    /// First chord of each non-empty progression, in corpus order.
    first_chords: Vec<String>,
}

impl TransitionGraph {
    /// Count every adjacent pair in every flattened progression. Loops
    /// also count the wrap from their last chord back to their first.
    pub fn build(progressions: &[Progression], index: &CanonicalIndex) -> Self {
        let mut graph = TransitionGraph::default();

        for progression in progressions {
            let flat = index.flatten(progression);
            if let Some(first) = flat.first() {
                graph.first_chords.push(first.clone());
            }

            for pair in flat.windows(2) {
                graph.add_edge(&pair[0], &pair[1]);
            }

            if progression.kind == ProgressionKind::Loop && flat.len() > 1 {
                graph.add_edge(&flat[flat.len() - 1], &flat[0]);
            }
        }

        log::debug!(
            "Transition graph: {} progressions, {} labels, {} edges",
            progressions.len(),
            graph.labels().len(),
            graph.edge_total()
        );
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        *self
            .forward
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0) += 1;
        *self
            .backward
            .entry(to.to_string())
            .or_default()
            .entry(from.to_string())
            .or_insert(0) += 1;
    }

    /// Chords that follow `label`, with counts.
    pub fn successors(&self, label: &str) -> Option<&Counts> {
        self.forward.get(label).filter(|c| !c.is_empty())
    }

    /// Chords that precede `label`, with counts.
    pub fn predecessors(&self, label: &str) -> Option<&Counts> {
        self.backward.get(label).filter(|c| !c.is_empty())
    }

    pub fn edge_count(&self, from: &str, to: &str) -> u32 {
        self.forward
            .get(from)
            .and_then(|c| c.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all edge multiplicities.
    pub fn edge_total(&self) -> u64 {
        self.forward
            .values()
            .flat_map(|c| c.values())
            .map(|&n| n as u64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Successors of `label` repeated by multiplicity, e.g. `V → [I, I, vi]`.
    pub fn neighbor_list(&self, label: &str) -> Vec<String> {
        self.successors(label)
            .map(|counts| {
                counts
                    .iter()
                    .flat_map(|(next, &n)| std::iter::repeat_n(next.clone(), n as usize))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every label → neighbor list.
    pub fn transition_map(&self) -> BTreeMap<String, Vec<String>> {
        self.forward
            .keys()
            .map(|label| (label.clone(), self.neighbor_list(label)))
            .collect()
    }

    /// All pair counts, most frequent first (ties by pair order).
    pub fn pair_counts(&self) -> Vec<(ChordPair, u32)> {
        let mut pairs: Vec<(ChordPair, u32)> = self
            .forward
            .iter()
            .flat_map(|(from, counts)| {
                counts
                    .iter()
                    .map(move |(to, &n)| (ChordPair::new(from, to), n))
            })
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }

    /// Pair counts as a share of all transitions. Empty when there are none.
    pub fn pair_frequencies(&self) -> Vec<(ChordPair, f64)> {
        let total = self.edge_total();
        if total == 0 {
            return Vec::new();
        }
        self.pair_counts()
            .into_iter()
            .map(|(pair, n)| (pair, n as f64 / total as f64))
            .collect()
    }

    /// One opening chord per non-empty progression, duplicates kept.
    pub fn start_candidates(&self) -> &[String] {
        &self.first_chords
    }

    /// How often each chord opens a progression, most frequent first.
    pub fn first_chord_counts(&self) -> Vec<(String, u32)> {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for label in &self.first_chords {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        let mut out: Vec<(String, u32)> = counts
            .into_iter()
            .map(|(label, n)| (label.to_string(), n))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    pub fn first_chord_frequencies(&self) -> Vec<(String, f64)> {
        let total = self.first_chords.len();
        if total == 0 {
            return Vec::new();
        }
        self.first_chord_counts()
            .into_iter()
            .map(|(label, n)| (label, n as f64 / total as f64))
            .collect()
    }

    /// Every label appearing on either end of an edge.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.forward
            .keys()
            .chain(self.backward.keys())
            .map(String::as_str)
            .collect()
    }

    /// Forward and backward views agree edge for edge.
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(from, counts)| {
            counts.iter().all(|(to, &n)| {
                self.backward
                    .get(to)
                    .and_then(|preds| preds.get(from))
                    .is_some_and(|&m| m == n)
            })
        });
        let backward_ok = self.backward.iter().all(|(to, counts)| {
            counts
                .iter()
                .all(|(from, &n)| self.edge_count(from, to) == n)
        });
        forward_ok && backward_ok
    }
}

/// Borrow a count table as `(label, count)` pairs for weighted sampling.
pub fn weighted_items(counts: &Counts) -> Vec<(&str, u32)> {
    counts.iter().map(|(label, &n)| (label.as_str(), n)).collect()
}
