use rand::Rng;

use crate::graph::{TransitionGraph, weighted_items};
use crate::rng::weighted_choice;

/// Grow a path of up to `length` chords that ends on `target`.
///
/// Each step prepends a predecessor of the current head, drawn in
/// proportion to edge counts. A chord never precedes itself unless it is
/// its only recorded predecessor. When the head has no predecessors the
/// walk stops and the shorter path is returned; callers must check the
/// length. The result reads oldest first, `target` last.
pub fn build_backward_path<R: Rng + ?Sized>(
    target: &str,
    length: usize,
    graph: &TransitionGraph,
    rng: &mut R,
) -> Vec<String> {
    // Built target-first, reversed at the end
    let mut reversed = vec![target.to_string()];

    while reversed.len() < length {
        let head = reversed[reversed.len() - 1].as_str();
        let Some(counts) = graph.predecessors(head) else {
            log::trace!(
                "No predecessors for {head}, stopping at {} of {length}",
                reversed.len()
            );
            break;
        };

        let mut items = weighted_items(counts);
        if items.iter().any(|&(label, n)| label != head && n > 0) {
            items.retain(|&(label, _)| label != head);
        }

        match weighted_choice(rng, &items) {
            Some(prev) => reversed.push(prev.to_string()),
            None => break,
        }
    }

    reversed.reverse();
    reversed
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
    fn test_no_predecessors_returns_target_only() {
        let g = graph_of(&[Progression::from_labels(&["I", "IV", "V"], ProgressionKind::Linear)]);
        let mut rng = create_rng(Some(1));
        assert_eq!(build_backward_path("I", 4, &g, &mut rng), vec!["I"]);
    }

    #[test]
    fn test_unknown_target() {
        let g = graph_of(&[]);
        let mut rng = create_rng(Some(1));
        assert_eq!(build_backward_path("bVII", 3, &g, &mut rng), vec!["bVII"]);
    }

    #[test]
    fn test_ends_on_target_and_follows_edges() {
        let g = graph_of(&[
            Progression::from_labels(&["I", "vi", "IV", "V", "I"], ProgressionKind::Loop),
            Progression::from_labels(&["ii", "V", "vi", "IV"], ProgressionKind::Loop),
        ]);
        let mut rng = create_rng(Some(21));
        for _ in 0..50 {
            let path = build_backward_path("vi", 6, &g, &mut rng);
            assert_eq!(path.len(), 6);
            assert_eq!(path.last().map(String::as_str), Some("vi"));
            for pair in path.windows(2) {
                assert!(g.edge_count(&pair[0], &pair[1]) > 0, "{} -> {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_truncates_at_source() {
        let g = graph_of(&[Progression::from_labels(&["ii", "V", "I"], ProgressionKind::Linear)]);
        let mut rng = create_rng(Some(2));
        assert_eq!(build_backward_path("I", 10, &g, &mut rng), vec!["ii", "V", "I"]);
    }

    #[test]
    fn test_avoids_self_repeat_when_possible() {
        let g = graph_of(&[
            Progression::from_labels(&["V", "V", "V", "V", "V", "I"], ProgressionKind::Linear),
            Progression::from_labels(&["IV", "V"], ProgressionKind::Linear),
        ]);
        let mut rng = create_rng(Some(4));
        for _ in 0..50 {
            let path = build_backward_path("V", 2, &g, &mut rng);
            assert_eq!(path, vec!["IV", "V"]);
        }
    }

    #[test]
    fn test_self_repeat_when_only_option() {
        let g = graph_of(&[Progression::from_labels(&["I", "I"], ProgressionKind::Linear)]);
        let mut rng = create_rng(Some(4));
        assert_eq!(build_backward_path("I", 3, &g, &mut rng), vec!["I", "I", "I"]);
    }

    #[test]
    fn test_zero_and_one_length() {
        let g = graph_of(&[Progression::from_labels(&["V", "I"], ProgressionKind::Linear)]);
        let mut rng = create_rng(Some(4));
        assert_eq!(build_backward_path("I", 0, &g, &mut rng), vec!["I"]);
        assert_eq!(build_backward_path("I", 1, &g, &mut rng), vec!["I"]);
    }
}
