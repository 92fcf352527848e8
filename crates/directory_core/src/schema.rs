use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::options::Dimension;

/// One entry of the activities document.
///
/// Field names follow the lowercase layout (`name`, `age`, `type`, ...). The
/// capitalized layout (`Title`, `AgeGroup`, `Link1`, ...) is accepted through
/// aliases so either document shape loads into the same record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActivityRecord {
    #[serde(alias = "Title", alias = "title", alias = "Name")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub name: Option<String>,

    #[serde(alias = "Description")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub description: Option<String>,

    #[serde(alias = "Category")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub category: Option<String>,

    #[serde(rename = "type", alias = "Type")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub kind: Option<String>,

    #[serde(alias = "AgeGroup", alias = "age_group")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub age: Option<String>,

    #[serde(alias = "Location")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub location: Option<String>,

    #[serde(alias = "Language")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub language: Option<String>,

    /// Comma-delimited labels, e.g. "indoor,weekly".
    #[serde(alias = "Tags")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub tags: Option<String>,

    #[serde(alias = "Link1", alias = "Link")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub link: Option<String>,

    #[serde(alias = "Link2")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub link2: Option<String>,

    #[serde(alias = "HowToApply")]
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub how_to_apply: Option<String>,
}

impl ActivityRecord {
    /// Decode one array entry field by field. Each field takes its canonical
    /// key first, then its aliases; a field with no usable value stays absent.
    /// Entries that are not objects become an empty record.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            tracing::debug!("activity entry is not an object; using empty record");
            return Self::default();
        };
        let pick = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| map.get(*key))
                .find_map(text_from_value)
        };
        Self {
            name: pick(&["name", "Title", "title", "Name"]),
            description: pick(&["description", "Description"]),
            category: pick(&["category", "Category"]),
            kind: pick(&["type", "Type"]),
            age: pick(&["age", "AgeGroup", "age_group"]),
            location: pick(&["location", "Location"]),
            language: pick(&["language", "Language"]),
            tags: pick(&["tags", "Tags"]),
            link: pick(&["link", "Link1", "Link"]),
            link2: pick(&["link2", "Link2"]),
            how_to_apply: pick(&["how_to_apply", "HowToApply"]),
        }
    }

    /// Categorical value for a filter dimension, trimmed, `None` when blank.
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        let raw = match dimension {
            Dimension::Age => &self.age,
            Dimension::Type => &self.kind,
            Dimension::Category => &self.category,
            Dimension::Location => &self.location,
            Dimension::Language => &self.language,
        };
        present(raw)
    }

    /// Lowercased haystack used by the free-text search.
    pub fn search_text(&self) -> String {
        [
            &self.name,
            &self.description,
            &self.kind,
            &self.category,
            &self.age,
            &self.location,
            &self.tags,
        ]
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Trimmed view of an optional field; whitespace-only counts as absent.
pub fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(text_from_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}
