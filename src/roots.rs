//! Root-pitch lookup for roman-numeral chord labels.
//!
//! Numerals are read against C major: `I` is C, `V` is G, `bVI` is Ab.
//! Secondary functions (`V/ii`, `viio/V`) resolve the target's root first
//! and then transpose by the function's interval.

use std::sync::LazyLock;

use regex::Regex;

use crate::notes::{circular_distance, int_to_note, pitch_class};

/// Extension digits that do not change the root (`V7`, `I6`, `I64`).
static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"64|6|7").expect("valid extension regex"));

/// Pitch class used when a numeral is not in the table.
pub const FALLBACK_ROOT: u8 = 0;

fn strip_extensions(numeral: &str) -> String {
    EXTENSION_RE.replace_all(numeral.trim(), "").into_owned()
}

/// Root pitch of a plain numeral, or `None` if the table doesn't know it.
fn numeral_pitch(numeral: &str) -> Option<u8> {
    let pitch = match strip_extensions(numeral).as_str() {
        "I" => 0,
        "ii" | "II" => 2,
        "iii" | "III" => 4,
        "IV" => 5,
        "V" => 7,
        "vi" | "VI" => 9,
        "vii" | "VII" => 11,
        "bII" | "#I" => 1,
        "bIII" | "#II" => 3,
        "bV" | "#IV" => 6,
        "bVI" | "#V" => 8,
        "bVII" | "#VI" => 10,
        _ => return None,
    };
    Some(pitch)
}

/// Semitone offset applied by a secondary function, if recognized.
///
/// The function must match exactly; `V7/V` is not `V/V` and keeps the
/// target's root.
fn secondary_offset(function: &str) -> Option<i32> {
    match function.trim() {
        "V" => Some(7),
        "IV" => Some(5),
        "ii" => Some(2),
        "viio" => Some(-1),
        _ => None,
    }
}

/// Resolve a label to its root pitch class.
///
/// Unknown numerals resolve to C. This is lossy on purpose: similarity
/// scoring needs *some* root for every chord in the catalog.
pub fn root_pitch(label: &str) -> u8 {
    let parts: Vec<&str> = label.split('/').collect();
    match parts.as_slice() {
        [function, target] => {
            let base = numeral_pitch(target).unwrap_or(FALLBACK_ROOT);
            match secondary_offset(function) {
                Some(offset) => pitch_class(base as i32 + offset),
                None => base,
            }
        }
        [plain] => numeral_pitch(plain).unwrap_or_else(|| {
            log::trace!("No root for numeral {plain:?}, using C");
            FALLBACK_ROOT
        }),
        _ => FALLBACK_ROOT,
    }
}

/// Spelled root note of a label.
pub fn root_name(label: &str, use_flats: bool) -> &'static str {
    int_to_note(root_pitch(label) as i32, use_flats)
}

/// Order candidate labels by root distance to `target`.
/// Ties go to the shorter label, then to input order.
pub fn sort_by_root_proximity<S: AsRef<str>>(target: &str, candidates: &[S]) -> Vec<String> {
    let target_root = root_pitch(target);
    let mut sorted: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();
    sorted.sort_by_key(|c| (circular_distance(root_pitch(c), target_root), c.len()));
    sorted.into_iter().map(str::to_string).collect()
}
