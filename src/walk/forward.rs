use rand::Rng;
use rand::seq::SliceRandom;

use crate::graph::{TransitionGraph, weighted_items};
use crate::rng::weighted_choice;

/// Walk the forward graph for `length` chords.
///
/// Starts from a random entry of `start_candidates`. Each next chord is
/// drawn in proportion to how often it followed the current one. A chord
/// with no recorded successor restarts the walk from a fresh random start,
/// so the result always has `length` chords unless there is nowhere to
/// start from at all.
pub fn build_progression<R: Rng + ?Sized>(
    start_candidates: &[String],
    graph: &TransitionGraph,
    length: usize,
    rng: &mut R,
) -> Vec<String> {
    let Some(first) = start_candidates.choose(rng) else {
        log::debug!("No start candidates, nothing to generate");
        return Vec::new();
    };
    if length == 0 {
        return Vec::new();
    }

    let mut progression = Vec::with_capacity(length);
    let mut current = first.clone();
    progression.push(current.clone());

    while progression.len() < length {
        let next = graph
            .successors(&current)
            .and_then(|counts| weighted_choice(rng, &weighted_items(counts)).map(str::to_string));

        current = match next {
            Some(next) => next,
            None => {
                // start_candidates is non-empty here
                let restart = start_candidates[rng.gen_range(0..start_candidates.len())].clone();
                log::trace!("Dead end at {current}, restarting from {restart}");
                restart
            }
        };
        progression.push(current.clone());
    }

    progression
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalIndex;
    use crate::catalog::{Progression, ProgressionKind};
    use crate::rng::create_rng;

    fn graph_of(progressions: &[Progression]) -> TransitionGraph {
        TransitionGraph::build(progressions, &CanonicalIndex::default())
    }

    #[test]
    fn test_always_reaches_length() {
        let g = graph_of(&[Progression::from_labels(&["I", "IV", "V"], ProgressionKind::Linear)]);
        let mut rng = create_rng(Some(5));
        for length in 1..20 {
            let prog = build_progression(g.start_candidates(), &g, length, &mut rng);
            assert_eq!(prog.len(), length);
        }
    }

    #[test]
    fn test_follows_only_recorded_edges_or_restarts() {
        let g = graph_of(&[
            Progression::from_labels(&["I", "IV", "V"], ProgressionKind::Linear),
            Progression::from_labels(&["vi", "ii", "V"], ProgressionKind::Linear),
        ]);
        let starts = g.start_candidates();
        let mut rng = create_rng(Some(9));
        let prog = build_progression(starts, &g, 50, &mut rng);
        assert!(starts.contains(&prog[0]));
        for pair in prog.windows(2) {
            let followed = g.edge_count(&pair[0], &pair[1]) > 0;
            let restarted = g.successors(&pair[0]).is_none() && starts.contains(&pair[1]);
            assert!(followed || restarted, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_loop_cycles_deterministically() {
        let g = graph_of(&[Progression::from_labels(&["I", "V", "vi", "IV"], ProgressionKind::Loop)]);
        let mut rng = create_rng(Some(1));
        let prog = build_progression(g.start_candidates(), &g, 8, &mut rng);
        assert_eq!(prog, vec!["I", "V", "vi", "IV", "I", "V", "vi", "IV"]);
    }

    #[test]
    fn test_same_seed_same_progression() {
        let g = graph_of(&[
            Progression::from_labels(&["I", "vi", "IV", "V", "I", "IV", "I"], ProgressionKind::Loop),
            Progression::from_labels(&["ii", "V", "I", "vi"], ProgressionKind::Loop),
        ]);
        let a = build_progression(g.start_candidates(), &g, 16, &mut create_rng(Some(77)));
        let b = build_progression(g.start_candidates(), &g, 16, &mut create_rng(Some(77)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_inputs() {
        let g = graph_of(&[]);
        let mut rng = create_rng(Some(1));
        assert!(build_progression(&[], &g, 4, &mut rng).is_empty());

        let starts = vec!["I".to_string()];
        assert!(build_progression(&starts, &g, 0, &mut rng).is_empty());
        // No edges at all: every step restarts
        assert_eq!(build_progression(&starts, &g, 3, &mut rng), vec!["I", "I", "I"]);
    }
}
