use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::canonical::CanonicalIndex;
use crate::catalog::Chord;
use crate::notes::{circular_distance, note_to_int};
use crate::roots::root_pitch;

/// Default score a chord must reach to count as "similar".
pub const DEFAULT_THRESHOLD: f64 = 0.8;

// Weights in tenths so that identical chords score exactly 1.0.
const ROOT_WEIGHT: f64 = 2.0;
const OVERLAP_WEIGHT: f64 = 7.0;
const QUALITY_WEIGHT: f64 = 1.0;
const WEIGHT_TOTAL: f64 = ROOT_WEIGHT + OVERLAP_WEIGHT + QUALITY_WEIGHT;

/// Rough chord quality read from the label text.
///
/// This is a substring heuristic, not a chord parser: any "o" reads as
/// diminished and any "m" as minor, so "Cmaj7" counts as minor. Bridge
/// selection in the modulation planner is tuned against this behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityMarkers {
    pub diminished: bool,
    pub minor: bool,
}

impl QualityMarkers {
    pub fn from_label(label: &str) -> Self {
        QualityMarkers {
            diminished: label.contains('o'),
            minor: label.contains('m'),
        }
    }

    fn is_major(&self) -> bool {
        !self.diminished && !self.minor
    }

    /// 1.0 when both are diminished, else both minor, else both major.
    pub fn matches(&self, other: &QualityMarkers) -> f64 {
        let same = (self.diminished && other.diminished)
            || (self.minor && other.minor)
            || (self.is_major() && other.is_major());
        if same { 1.0 } else { 0.0 }
    }
}

/// The text the quality heuristic reads: the display symbol, or the
/// numeral for chords without one.
fn quality_label(chord: &Chord) -> &str {
    if chord.symbol.is_empty() {
        &chord.roman_numeral
    } else {
        &chord.symbol
    }
}

/// 1.0 for the same root, 0.0 for a tritone apart.
pub fn root_closeness(a: u8, b: u8) -> f64 {
    1.0 - circular_distance(a, b) as f64 / 6.0
}

/// Jaccard overlap of two note lists after mapping to pitch classes.
/// Unparseable names are ignored; two empty sets overlap fully.
pub fn note_overlap<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let left: HashSet<u8> = a.iter().filter_map(|n| note_to_int(n.as_ref()).ok()).collect();
    let right: HashSet<u8> = b.iter().filter_map(|n| note_to_int(n.as_ref()).ok()).collect();
    let union = left.union(&right).count();
    if union == 0 {
        return 1.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// Harmonic closeness of two chords in [0, 1]:
/// `0.2 * root closeness + 0.7 * note overlap + 0.1 * quality match`.
pub fn proximity(a: &Chord, b: &Chord) -> f64 {
    let root = root_closeness(root_pitch(&a.roman_numeral), root_pitch(&b.roman_numeral));
    let overlap = note_overlap(&a.notes, &b.notes);
    let quality = QualityMarkers::from_label(quality_label(a))
        .matches(&QualityMarkers::from_label(quality_label(b)));

    (ROOT_WEIGHT * root + OVERLAP_WEIGHT * overlap + QUALITY_WEIGHT * quality) / WEIGHT_TOTAL
}

/// Canonical labels of catalog chords scoring at least `threshold` against
/// `label`.
///
/// A label the catalog doesn't know is compared as a random catalog chord
/// instead, so callers always get candidates from a non-empty catalog.
pub fn find_similar<R: Rng + ?Sized>(
    label: &str,
    index: &CanonicalIndex,
    threshold: f64,
    rng: &mut R,
) -> Vec<String> {
    let pool = index.chords();
    let reference = match index.chord(label) {
        Some(chord) => chord,
        None => match pool.choose(rng) {
            Some(chord) => {
                log::debug!(
                    "{label:?} not in catalog, comparing against {} instead",
                    chord.roman_numeral
                );
                chord
            }
            None => return Vec::new(),
        },
    };

    pool.iter()
        .filter(|candidate| proximity(reference, candidate) >= threshold)
        .map(|candidate| candidate.roman_numeral.clone())
        .collect()
}

/// Pool chords ranked by score against `chord`, best first.
pub fn rank_similar(chord: &Chord, pool: &[Chord], limit: usize) -> Vec<(String, f64)> {
    let mut scored: Vec<(String, f64)> = pool
        .iter()
        .map(|c| (c.roman_numeral.clone(), proximity(chord, c)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}
