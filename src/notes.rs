use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Invalid note name: {0:?}")]
    InvalidNote(String),
}

pub type Result<T> = std::result::Result<T, NoteError>;

/// Sharp spellings indexed by pitch class.
const SHARPS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings indexed by pitch class.
const FLATS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Normalize any integer into the 0..12 range.
pub fn pitch_class(value: i32) -> u8 {
    value.rem_euclid(12) as u8
}

/// Convert a note name ("C#", "Db", "e", "Cb") to its pitch class 0–11.
///
/// One accidental at most. `B#`, `E#`, `Cb` and `Fb` wrap around the octave.
pub fn note_to_int(name: &str) -> Result<u8> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(NoteError::InvalidNote(name.to_string())),
    };

    let offset = match chars.as_str() {
        "" => 0,
        "#" => 1,
        "b" => -1,
        _ => return Err(NoteError::InvalidNote(name.to_string())),
    };

    Ok(pitch_class(base + offset))
}

/// Spell a pitch class. Any integer is accepted, including negatives.
pub fn int_to_note(pitch: i32, use_flats: bool) -> &'static str {
    let pc = pitch_class(pitch) as usize;
    if use_flats { FLATS[pc] } else { SHARPS[pc] }
}

/// Sharp and flat spellings for a pitch class, deduplicated for naturals.
pub fn enharmonic_names(pitch: i32) -> Vec<&'static str> {
    let pc = pitch_class(pitch) as usize;
    let mut names = vec![SHARPS[pc]];
    if FLATS[pc] != SHARPS[pc] {
        names.push(FLATS[pc]);
    }
    names
}

/// Shortest distance between two pitch classes around the circle, 0–6.
pub fn circular_distance(a: u8, b: u8) -> u8 {
    let diff = (a as i32 - b as i32).unsigned_abs() % 12;
    diff.min(12 - diff) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_int_naturals() {
        assert_eq!(note_to_int("C"), Ok(0));
        assert_eq!(note_to_int("D"), Ok(2));
        assert_eq!(note_to_int("E"), Ok(4));
        assert_eq!(note_to_int("F"), Ok(5));
        assert_eq!(note_to_int("G"), Ok(7));
        assert_eq!(note_to_int("A"), Ok(9));
        assert_eq!(note_to_int("B"), Ok(11));
    }

    #[test]
    fn test_enharmonic_invariance() {
        assert_eq!(note_to_int("C#"), Ok(1));
        assert_eq!(note_to_int("Db"), Ok(1));
        assert_eq!(note_to_int("A#"), note_to_int("Bb"));
        assert_eq!(note_to_int("Gb"), note_to_int("F#"));
    }

    #[test]
    fn test_wraparound_spellings() {
        assert_eq!(note_to_int("B#"), Ok(0));
        assert_eq!(note_to_int("Cb"), Ok(11));
        assert_eq!(note_to_int("E#"), Ok(5));
        assert_eq!(note_to_int("Fb"), Ok(4));
    }

    #[test]
    fn test_note_to_int_tolerates_case_and_whitespace() {
        assert_eq!(note_to_int(" eb "), Ok(3));
        assert_eq!(note_to_int("f#"), Ok(6));
    }

    #[test]
    fn test_invalid_notes() {
        assert_eq!(note_to_int("H"), Err(NoteError::InvalidNote("H".into())));
        assert!(note_to_int("").is_err());
        assert!(note_to_int("C##").is_err());
        assert!(note_to_int("Cx").is_err());
    }

    #[test]
    fn test_int_to_note_negative_and_large() {
        assert_eq!(int_to_note(-1, false), "B");
        assert_eq!(int_to_note(-11, true), "Db");
        assert_eq!(int_to_note(25, false), "C#");
        assert_eq!(int_to_note(12, true), "C");
    }

    #[test]
    fn test_spelling_round_trip_stable() {
        for p in -24..24 {
            for flats in [false, true] {
                let name = int_to_note(p, flats);
                let back = note_to_int(name).unwrap();
                assert_eq!(int_to_note(back as i32, flats), name);
            }
        }
    }

    #[test]
    fn test_enharmonic_names() {
        assert_eq!(enharmonic_names(0), vec!["C"]);
        assert_eq!(enharmonic_names(1), vec!["C#", "Db"]);
        assert_eq!(enharmonic_names(-2), vec!["A#", "Bb"]);
        assert_eq!(enharmonic_names(4), vec!["E"]);
    }

    #[test]
    fn test_circular_distance_symmetric_and_bounded() {
        for a in 0..12u8 {
            for b in 0..12u8 {
                let d = circular_distance(a, b);
                assert_eq!(d, circular_distance(b, a));
                assert!(d <= 6);
            }
        }
        assert_eq!(circular_distance(0, 6), 6);
        assert_eq!(circular_distance(0, 11), 1);
        assert_eq!(circular_distance(2, 9), 5);
    }
}
