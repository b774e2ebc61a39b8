//! Random source construction and the weighted draw used by every walk.
//!
//! Nothing in the crate owns a global generator: callers build one here
//! and pass it down, so a fixed seed reproduces a whole run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// The generator type used throughout the crate.
pub type ChordRng = Pcg64;

/// Seeded generator when a seed is given, entropy-seeded otherwise.
pub fn create_rng(seed: Option<u64>) -> ChordRng {
    match seed {
        Some(s) => {
            log::debug!("Using seed {s}");
            Pcg64::seed_from_u64(s)
        }
        None => Pcg64::from_entropy(),
    }
}

/// Pick one item with probability proportional to its count.
///
/// Draws `r` uniformly in `[0, total)` and returns the first item whose
/// running total exceeds `r`. Zero-count items are never chosen. Returns
/// `None` when the counts sum to zero.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[(T, u32)]) -> Option<T> {
    let total: u64 = items.iter().map(|&(_, c)| c as u64).sum();
    if total == 0 {
        return None;
    }

    let target = rng.gen_range(0..total);
    let mut cumulative = 0u64;
    for &(item, count) in items {
        cumulative += count as u64;
        if cumulative > target {
            return Some(item);
        }
    }
    // Unreachable while target < total
    items.iter().rev().find(|&&(_, c)| c > 0).map(|&(item, _)| item)
}
