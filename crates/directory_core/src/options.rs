use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::schema::ActivityRecord;

/// Categorical fields a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Age,
    Type,
    Category,
    Location,
    Language,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Age,
        Dimension::Type,
        Dimension::Category,
        Dimension::Location,
        Dimension::Language,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Dimension::Age => "age",
            Dimension::Type => "type",
            Dimension::Category => "category",
            Dimension::Location => "location",
            Dimension::Language => "language",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Age => "Age",
            Dimension::Type => "Type",
            Dimension::Category => "Category",
            Dimension::Location => "Location",
            Dimension::Language => "Language",
        }
    }
}

/// Distinct selectable values per dimension, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterOptionSet {
    values: BTreeMap<Dimension, Vec<String>>,
}

impl FilterOptionSet {
    pub fn derive(records: &[ActivityRecord]) -> Self {
        let mut values = BTreeMap::new();
        for dimension in Dimension::ALL {
            let distinct: BTreeSet<&str> = records
                .iter()
                .filter_map(|record| record.dimension(dimension))
                .collect();
            values.insert(
                dimension,
                distinct.into_iter().map(str::to_string).collect(),
            );
        }
        Self { values }
    }

    pub fn get(&self, dimension: Dimension) -> &[String] {
        self.values
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overwrite one dimension's list, as a surface does when options are pushed to it.
    pub fn set(&mut self, dimension: Dimension, values: &[String]) {
        self.values.insert(dimension, values.to_vec());
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: &str, category: &str) -> ActivityRecord {
        ActivityRecord {
            age: Some(age.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_sorted_distinct_trimmed() {
        let records = vec![
            record("8-12", " Strategy "),
            record("6-18", "Outdoor"),
            record("8-12", "Strategy"),
            record("", "   "),
        ];
        let options = FilterOptionSet::derive(&records);
        assert_eq!(options.get(Dimension::Age), ["6-18", "8-12"]);
        assert_eq!(options.get(Dimension::Category), ["Outdoor", "Strategy"]);
        assert!(options.get(Dimension::Language).is_empty());
    }

    #[test]
    fn test_derive_empty_working_set() {
        let options = FilterOptionSet::derive(&[]);
        assert!(options.is_empty());
        for dimension in Dimension::ALL {
            assert!(options.get(dimension).is_empty());
        }
    }

    #[test]
    fn test_serializes_by_dimension_key() {
        let options = FilterOptionSet::derive(&[record("8-12", "Strategy")]);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["age"], serde_json::json!(["8-12"]));
        assert_eq!(value["category"], serde_json::json!(["Strategy"]));
        assert_eq!(value["language"], serde_json::json!([]));
    }
}
