use serde::Deserialize;

use crate::notes::int_to_note;

/// A note as written in the chord dictionary: either a name ("Eb") or a
/// bare pitch class (3). Pitch classes are spelled with sharps.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoteField {
    Name(String),
    Pitch(i32),
}

impl NoteField {
    pub fn into_name(self) -> String {
        match self {
            NoteField::Name(name) => name,
            NoteField::Pitch(p) => int_to_note(p, false).to_string(),
        }
    }
}

/// One chord dictionary entry, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordRecord {
    pub symbol: String,
    pub roman_numeral: String,
    #[serde(default)]
    pub notes: Vec<NoteField>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Genre tag(s): the corpus has both `"genre": "Jazz"` and `"genre": [..]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    One(String),
    Many(Vec<String>),
}

/// One progression in the corpus, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressionRecord {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub period: Option<String>,
    pub genre: Option<GenreField>,
    pub composer: Option<String>,
    pub artist: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub bars: Vec<Vec<Vec<String>>>,
}

/// A chord with its canonical roman-numeral label.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub roman_numeral: String,
    pub symbol: String,
    pub synonyms: Vec<String>,
    /// Bass first.
    pub notes: Vec<String>,
}

impl Chord {
    pub fn new(roman_numeral: &str, symbol: &str, notes: &[&str]) -> Self {
        Chord {
            roman_numeral: roman_numeral.to_string(),
            symbol: symbol.to_string(),
            synonyms: Vec::new(),
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn with_synonyms(mut self, synonyms: &[&str]) -> Self {
        self.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Every name this chord answers to: symbol, numeral, then synonyms.
    /// Deduplicated, empty names dropped.
    pub fn aliases(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let names = std::iter::once(self.symbol.as_str())
            .chain(std::iter::once(self.roman_numeral.as_str()))
            .chain(self.synonyms.iter().map(String::as_str));
        for name in names {
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

impl From<ChordRecord> for Chord {
    fn from(r: ChordRecord) -> Self {
        Chord {
            roman_numeral: r.roman_numeral,
            symbol: r.symbol,
            synonyms: r.synonyms,
            notes: r.notes.into_iter().map(NoteField::into_name).collect(),
        }
    }
}

/// Whether a progression repeats. Decided once, when the record is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressionKind {
    #[default]
    Linear,
    /// The last chord leads back into the first.
    Loop,
}

impl ProgressionKind {
    /// Only the exact tag `"Loop"` marks a cyclic progression.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("Loop") => ProgressionKind::Loop,
            _ => ProgressionKind::Linear,
        }
    }
}

/// bar → beat → simultaneous chord labels
pub type Bars = Vec<Vec<Vec<String>>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progression {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub period: Option<String>,
    pub genres: Vec<String>,
    pub composer: Option<String>,
    pub artist: Option<String>,
    /// Free-form type tag as written in the corpus.
    pub tag: Option<String>,
    pub kind: ProgressionKind,
    pub bars: Bars,
}

impl Progression {
    /// Build a progression with one chord per bar.
    pub fn from_labels(labels: &[&str], kind: ProgressionKind) -> Self {
        Progression {
            kind,
            bars: labels.iter().map(|l| vec![vec![l.to_string()]]).collect(),
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled")
    }
}

impl From<ProgressionRecord> for Progression {
    fn from(r: ProgressionRecord) -> Self {
        let genres = match r.genre {
            Some(GenreField::One(g)) => vec![g],
            Some(GenreField::Many(gs)) => gs,
            None => Vec::new(),
        };
        Progression {
            name: r.name,
            year: r.year,
            period: r.period,
            genres,
            composer: r.composer,
            artist: r.artist,
            kind: ProgressionKind::from_tag(r.kind.as_deref()),
            tag: r.kind,
            bars: r.bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_dedup_and_order() {
        let chord = Chord::new("V7", "G7", &["G", "B", "D", "F"]).with_synonyms(&["G7", "Gdom7", ""]);
        assert_eq!(chord.aliases(), vec!["G7", "V7", "Gdom7"]);
    }

    #[test]
    fn test_kind_from_tag_exact_match_only() {
        assert_eq!(ProgressionKind::from_tag(Some("Loop")), ProgressionKind::Loop);
        assert_eq!(ProgressionKind::from_tag(Some("loop")), ProgressionKind::Linear);
        assert_eq!(ProgressionKind::from_tag(Some("Cadence")), ProgressionKind::Linear);
        assert_eq!(ProgressionKind::from_tag(None), ProgressionKind::Linear);
    }

    #[test]
    fn test_chord_record_from_json() {
        let json = r#"{"symbol": "Cmaj7", "romanNumeral": "Imaj7", "notes": ["C", "E", 7, "B"], "synonyms": ["CM7"]}"#;
        let record: ChordRecord = serde_json::from_str(json).unwrap();
        let chord = Chord::from(record);
        assert_eq!(chord.roman_numeral, "Imaj7");
        assert_eq!(chord.notes, vec!["C", "E", "G", "B"]);
        assert_eq!(chord.synonyms, vec!["CM7"]);
    }

    #[test]
    fn test_chord_record_defaults() {
        let json = r#"{"symbol": "C", "romanNumeral": "I"}"#;
        let chord = Chord::from(serde_json::from_str::<ChordRecord>(json).unwrap());
        assert!(chord.notes.is_empty());
        assert!(chord.synonyms.is_empty());
    }

    #[test]
    fn test_progression_record_from_json() {
        let json = r#"{
            "name": "Axis",
            "year": 2005,
            "genre": "Pop",
            "type": "Loop",
            "bars": [[["I"]], [["V"]], [["vi"]], [["IV"]]]
        }"#;
        let prog = Progression::from(serde_json::from_str::<ProgressionRecord>(json).unwrap());
        assert_eq!(prog.kind, ProgressionKind::Loop);
        assert_eq!(prog.tag.as_deref(), Some("Loop"));
        assert_eq!(prog.genres, vec!["Pop"]);
        assert_eq!(prog.bars.len(), 4);
    }

    #[test]
    fn test_progression_genre_list() {
        let json = r#"{"genre": ["Jazz", "Bebop"], "bars": []}"#;
        let prog = Progression::from(serde_json::from_str::<ProgressionRecord>(json).unwrap());
        assert_eq!(prog.genres, vec!["Jazz", "Bebop"]);
        assert_eq!(prog.kind, ProgressionKind::Linear);
        assert_eq!(prog.display_name(), "Untitled");
    }
}
