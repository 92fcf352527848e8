use std::collections::BTreeMap;

use crate::options::Dimension;
use crate::schema::ActivityRecord;

/// Current search term plus the values selected for each dimension.
///
/// Dimensions are combined with AND. Within a dimension a record passes when
/// nothing is selected, or when its field contains at least one of the
/// selected values as a case-sensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    selections: BTreeMap<Dimension, Vec<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, term: &str) -> Self {
        Self {
            search: term.trim().to_string(),
            ..self
        }
    }

    pub fn with_selection<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|value| value.as_ref().trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if values.is_empty() {
            self.selections.remove(&dimension);
        } else {
            self.selections.insert(dimension, values);
        }
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self, dimension: Dimension) -> &[String] {
        self.selections
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.selections.is_empty()
    }

    pub fn matches(&self, record: &ActivityRecord) -> bool {
        if !self.search.is_empty()
            && !record.search_text().contains(&self.search.to_lowercase())
        {
            return false;
        }
        self.selections.iter().all(|(dimension, wanted)| {
            let field = record.dimension(*dimension).unwrap_or("");
            wanted.iter().any(|value| field.contains(value.as_str()))
        })
    }

    /// Matching records, in working-set order.
    pub fn apply<'a>(&self, records: &'a [ActivityRecord]) -> Vec<&'a ActivityRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord {
                name: Some("Chess Club".to_string()),
                age: Some("8-12".to_string()),
                kind: Some("Club".to_string()),
                category: Some("Strategy".to_string()),
                tags: Some("indoor,weekly".to_string()),
                ..Default::default()
            },
            ActivityRecord {
                name: Some("Soccer".to_string()),
                age: Some("6-18".to_string()),
                kind: Some("Sport".to_string()),
                category: Some("Outdoor".to_string()),
                tags: Some("outdoor".to_string()),
                ..Default::default()
            },
            ActivityRecord {
                name: Some("Debate".to_string()),
                kind: Some("Club, Academic".to_string()),
                location: Some("Library".to_string()),
                ..Default::default()
            },
        ]
    }

    fn names<'a>(records: &[&'a ActivityRecord]) -> Vec<&'a str> {
        records.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    #[test]
    fn test_empty_state_returns_everything_in_order() {
        let records = sample();
        let hits = FilterState::new().apply(&records);
        assert_eq!(names(&hits), vec!["Chess Club", "Soccer", "Debate"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let hits = FilterState::new().with_search("  CHESS ").apply(&records);
        assert_eq!(names(&hits), vec!["Chess Club"]);
    }

    #[test]
    fn test_search_keeps_typed_case() {
        let state = FilterState::new().with_search("  Chess ");
        assert_eq!(state.search(), "Chess");
        let records = sample();
        assert_eq!(names(&state.apply(&records)), vec!["Chess Club"]);
    }

    #[test]
    fn test_search_covers_tags_and_location() {
        let records = sample();
        let by_tag = FilterState::new().with_search("weekly").apply(&records);
        assert_eq!(names(&by_tag), vec!["Chess Club"]);
        let by_location = FilterState::new().with_search("library").apply(&records);
        assert_eq!(names(&by_location), vec!["Debate"]);
    }

    #[test]
    fn test_category_selection() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Category, ["Outdoor"])
            .apply(&records);
        assert_eq!(names(&hits), vec!["Soccer"]);
    }

    #[test]
    fn test_selection_is_substring_match() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Type, ["Club"])
            .apply(&records);
        assert_eq!(names(&hits), vec!["Chess Club", "Debate"]);
    }

    #[test]
    fn test_selection_is_case_sensitive() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Type, ["club"])
            .apply(&records);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_multi_select_is_any_within_dimension() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Age, ["6-18", "8-12"])
            .apply(&records);
        assert_eq!(names(&hits), vec!["Chess Club", "Soccer"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Type, ["Club"])
            .with_selection(Dimension::Age, ["8-12"])
            .apply(&records);
        assert_eq!(names(&hits), vec!["Chess Club"]);

        let none = FilterState::new()
            .with_search("chess")
            .with_selection(Dimension::Category, ["Outdoor"])
            .apply(&records);
        assert!(none.is_empty());
    }

    #[test]
    fn test_missing_field_fails_active_dimension() {
        let records = sample();
        let hits = FilterState::new()
            .with_selection(Dimension::Location, ["Library"])
            .apply(&records);
        assert_eq!(names(&hits), vec!["Debate"]);
    }

    #[test]
    fn test_blank_selection_values_are_ignored() {
        let state = FilterState::new().with_selection(Dimension::Age, ["", "  "]);
        assert!(state.is_empty());
        assert!(state.selected(Dimension::Age).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent_and_order_preserving() {
        let records = sample();
        let state = FilterState::new().with_search("o");
        let first = state.apply(&records);
        let second = state.apply(&records);
        assert_eq!(first, second);

        let mut cursor = records.iter();
        for hit in &first {
            assert!(cursor.any(|r| std::ptr::eq(r, *hit)));
        }
    }
}
