use crate::catalog::Progression;

/// Metadata criteria for narrowing the corpus before building a graph.
/// Text fields compare case-insensitively; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProgressionFilter {
    /// Matches when the progression has any of these genres.
    pub genres: Vec<String>,
    pub period: Option<String>,
    pub composer: Option<String>,
    pub artist: Option<String>,
    /// Compared against the raw type tag ("Loop", "Cadence", ...).
    pub tag: Option<String>,
    /// Inclusive. Progressions without a year never pass a year bound.
    pub year_after: Option<i32>,
    pub year_before: Option<i32>,
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => actual.is_some_and(|a| a.eq_ignore_ascii_case(w)),
    }
}

impl ProgressionFilter {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.period.is_none()
            && self.composer.is_none()
            && self.artist.is_none()
            && self.tag.is_none()
            && self.year_after.is_none()
            && self.year_before.is_none()
    }

    pub fn matches(&self, p: &Progression) -> bool {
        let genre_ok = self.genres.is_empty()
            || p.genres
                .iter()
                .any(|g| self.genres.iter().any(|fg| fg.eq_ignore_ascii_case(g)));

        let year_after_ok = self
            .year_after
            .is_none_or(|min| p.year.is_some_and(|y| y >= min));
        let year_before_ok = self
            .year_before
            .is_none_or(|max| p.year.is_some_and(|y| y <= max));

        genre_ok
            && field_matches(self.period.as_deref(), p.period.as_deref())
            && field_matches(self.composer.as_deref(), p.composer.as_deref())
            && field_matches(self.artist.as_deref(), p.artist.as_deref())
            && field_matches(self.tag.as_deref(), p.tag.as_deref())
            && year_after_ok
            && year_before_ok
    }

    pub fn apply(&self, progressions: &[Progression]) -> Vec<Progression> {
        let filtered: Vec<Progression> = progressions
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        if !self.is_empty() {
            log::info!(
                "Filter kept {} of {} progressions",
                filtered.len(),
                progressions.len()
            );
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProgressionKind;

    fn make_prog(name: &str, year: Option<i32>, genres: &[&str], period: Option<&str>) -> Progression {
        Progression {
            name: Some(name.to_string()),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            period: period.map(str::to_string),
            ..Progression::from_labels(&["I", "V"], ProgressionKind::Linear)
        }
    }

    fn corpus() -> Vec<Progression> {
        vec![
            make_prog("Canon", Some(1680), &["Classical"], Some("Baroque")),
            make_prog("Axis", Some(2005), &["Pop", "Rock"], None),
            make_prog("Rhythm Changes", Some(1930), &["Jazz"], None),
            make_prog("Untitled Loop", None, &[], None),
        ]
    }

    fn names(progs: &[Progression]) -> Vec<&str> {
        progs.iter().map(|p| p.display_name()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = ProgressionFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&corpus()).len(), 4);
    }

    #[test]
    fn test_genre_any_match_case_insensitive() {
        let filter = ProgressionFilter {
            genres: vec!["rock".into(), "jazz".into()],
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&corpus())), vec!["Axis", "Rhythm Changes"]);
    }

    #[test]
    fn test_period() {
        let filter = ProgressionFilter {
            period: Some("baroque".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&corpus())), vec!["Canon"]);
    }

    #[test]
    fn test_year_bounds_inclusive() {
        let filter = ProgressionFilter {
            year_after: Some(1930),
            year_before: Some(2005),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&corpus())), vec!["Axis", "Rhythm Changes"]);
    }

    #[test]
    fn test_year_filter_excludes_undated() {
        let filter = ProgressionFilter {
            year_before: Some(3000),
            ..Default::default()
        };
        assert!(!names(&filter.apply(&corpus())).contains(&"Untitled Loop"));
    }

    #[test]
    fn test_tag_filter() {
        let mut progs = corpus();
        progs[3].tag = Some("Loop".into());
        let filter = ProgressionFilter {
            tag: Some("loop".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&progs)), vec!["Untitled Loop"]);
    }
}
