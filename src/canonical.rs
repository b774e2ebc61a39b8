use std::collections::{BTreeSet, HashMap};

use crate::catalog::{Chord, Progression};

/// Alias → canonical label lookup built from the chord dictionary.
///
/// Every symbol, numeral and synonym of a chord points at that chord's
/// roman numeral. When two chords claim the same alias, the one declared
/// first keeps it.
#[derive(Debug, Clone, Default)]
pub struct CanonicalIndex {
    chords: Vec<Chord>,
    /// Maps alias → index in `chords`
    alias_to_index: HashMap<String, usize>,
}

impl CanonicalIndex {
    pub fn build(chords: &[Chord]) -> Self {
        let mut alias_to_index = HashMap::new();
        let mut collisions = 0usize;

        for (i, chord) in chords.iter().enumerate() {
            for alias in chord.aliases() {
                if alias_to_index.contains_key(alias) {
                    collisions += 1;
                    log::trace!(
                        "Alias {alias:?} of {} already claimed, ignoring",
                        chord.roman_numeral
                    );
                    continue;
                }
                alias_to_index.insert(alias.to_string(), i);
            }
        }

        if collisions > 0 {
            log::debug!("{collisions} alias collisions while indexing {} chords", chords.len());
        }

        CanonicalIndex {
            chords: chords.to_vec(),
            alias_to_index,
        }
    }

    /// Canonical label for an alias, if any chord claims it.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.alias_to_index
            .get(label)
            .map(|&i| self.chords[i].roman_numeral.as_str())
    }

    /// Canonical label for an alias, or the label itself when unknown.
    pub fn canonical<'a>(&'a self, label: &'a str) -> &'a str {
        self.resolve(label).unwrap_or(label)
    }

    /// The chord behind an alias.
    pub fn chord(&self, label: &str) -> Option<&Chord> {
        self.alias_to_index.get(label).map(|&i| &self.chords[i])
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn contains(&self, label: &str) -> bool {
        self.alias_to_index.contains_key(label)
    }

    /// Flatten bars → beats → labels into one sequence, canonicalizing each
    /// label. Unknown labels pass through unchanged.
    pub fn flatten(&self, progression: &Progression) -> Vec<String> {
        progression
            .bars
            .iter()
            .flatten()
            .flatten()
            .map(|label| self.canonical(label).to_string())
            .collect()
    }

    /// Labels used by the corpus that no chord claims, sorted.
    pub fn unknown_labels(&self, progressions: &[Progression]) -> Vec<String> {
        let unknown: BTreeSet<&str> = progressions
            .iter()
            .flat_map(|p| p.bars.iter().flatten().flatten())
            .map(String::as_str)
            .filter(|label| !self.contains(label))
            .collect();
        unknown.into_iter().map(str::to_string).collect()
    }
}
