use std::collections::HashSet;

use clap::ValueEnum;

use crate::notes::{self, int_to_note, note_to_int};

/// Scale families with their step formulas (semitones between degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleKind {
    #[value(alias = "ionian")]
    Major,
    #[value(aliases = ["aeolian", "minor"])]
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    PentatonicMajor,
    PentatonicMinor,
    Blues,
}

impl ScaleKind {
    pub fn steps(&self) -> &'static [u8] {
        match self {
            Self::Major => &[2, 2, 1, 2, 2, 2, 1],
            Self::NaturalMinor => &[2, 1, 2, 2, 1, 2, 2],
            Self::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            Self::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],
            Self::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            Self::Phrygian => &[1, 2, 2, 2, 1, 2, 2],
            Self::Lydian => &[2, 2, 2, 1, 2, 2, 1],
            Self::Mixolydian => &[2, 2, 1, 2, 2, 1, 2],
            Self::Locrian => &[1, 2, 2, 1, 2, 2, 2],
            Self::PentatonicMajor => &[2, 2, 3, 2, 3],
            Self::PentatonicMinor => &[3, 2, 2, 3, 2],
            Self::Blues => &[3, 2, 1, 1, 3, 2],
        }
    }
}

/// Spell a scale from `root`, including the octave return as the last entry.
pub fn scale(root: &str, kind: ScaleKind, use_flats: bool) -> notes::Result<Vec<&'static str>> {
    let mut current = note_to_int(root)? as i32;
    let mut out = vec![int_to_note(current, use_flats)];
    for &step in kind.steps() {
        current += step as i32;
        out.push(int_to_note(current, use_flats));
    }
    Ok(out)
}

/// Count pitch classes shared by two note lists, ignoring spelling.
/// Unparseable names are skipped.
pub fn count_common_pitches<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> usize {
    let left: HashSet<u8> = a.iter().filter_map(|n| note_to_int(n.as_ref()).ok()).collect();
    let right: HashSet<u8> = b.iter().filter_map(|n| note_to_int(n.as_ref()).ok()).collect();
    left.intersection(&right).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major() {
        let s = scale("C", ScaleKind::Major, false).unwrap();
        assert_eq!(s, vec!["C", "D", "E", "F", "G", "A", "B", "C"]);
    }

    #[test]
    fn test_flat_spelling() {
        let s = scale("F", ScaleKind::Major, true).unwrap();
        assert_eq!(s, vec!["F", "G", "A", "Bb", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_pentatonic_length() {
        let s = scale("A", ScaleKind::PentatonicMinor, false).unwrap();
        assert_eq!(s, vec!["A", "C", "D", "E", "G", "A"]);
    }

    #[test]
    fn test_invalid_root() {
        assert!(scale("X", ScaleKind::Dorian, false).is_err());
    }

    #[test]
    fn test_every_formula_spans_an_octave() {
        for kind in ScaleKind::value_variants() {
            let total: u32 = kind.steps().iter().map(|&s| s as u32).sum();
            assert_eq!(total, 12, "{kind:?}");
        }
    }

    #[test]
    fn test_common_pitches_across_spellings() {
        let c_major = scale("C", ScaleKind::Major, false).unwrap();
        let a_minor = scale("A", ScaleKind::NaturalMinor, false).unwrap();
        assert_eq!(count_common_pitches(&c_major, &a_minor), 7);

        assert_eq!(count_common_pitches(&["C#", "F"], &["Db", "E#", "G"]), 2);
        assert_eq!(count_common_pitches(&["C", "nonsense"], &["C"]), 1);
    }
}
