use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Body text of a slide as the provider handed it over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Points {
    /// One paragraph per element
    List(Vec<String>),
    /// A single paragraph
    Single(String),
    /// Missing, null or of a shape that cannot be used
    #[default]
    Empty,
}

impl Points {
    /// Decode loosely-typed JSON.
    ///
    /// Arrays become [`Points::List`] with every element coerced to text,
    /// strings, numbers and booleans become [`Points::Single`]. Anything
    /// else is [`Points::Empty`].
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.iter().map(coerce_text).collect()),
            Value::String(s) => Self::Single(s.clone()),
            Value::Number(_) | Value::Bool(_) => Self::Single(coerce_text(value)),
            Value::Null => Self::Empty,
            Value::Object(_) => {
                warn!("Ignoring points given as an object");
                Self::Empty
            },
        }
    }

    /// The paragraphs this body renders as. An empty string, or a list of
    /// nothing but empty strings, renders as nothing.
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            Self::List(items) if items.iter().all(String::is_empty) => Vec::new(),
            Self::List(items) => items.clone(),
            Self::Single(text) if text.is_empty() => Vec::new(),
            Self::Single(text) => vec![text.clone()],
            Self::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.iter().all(String::is_empty),
            Self::Single(text) => text.is_empty(),
            Self::Empty => true,
        }
    }
}

impl From<&str> for Points {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

impl From<String> for Points {
    fn from(text: String) -> Self {
        Self::Single(text)
    }
}

impl<S: Into<String>> From<Vec<S>> for Points {
    fn from(items: Vec<S>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// One requested slide: a title and its bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideRecord {
    pub title: Option<String>,
    pub points: Points,
}

impl SlideRecord {
    pub fn new(title: impl Into<String>, points: impl Into<Points>) -> Self {
        Self {
            title: Some(title.into()),
            points: points.into(),
        }
    }

    /// Decode one record, tolerating whatever shape the provider produced.
    ///
    /// A non-object value yields an empty record. A non-string title is
    /// coerced to text; a null title counts as missing.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            warn!(kind = value_kind(value), "Slide record is not an object, using an empty slide");
            return Self::default();
        };

        let title = match fields.get("title") {
            None | Some(Value::Null) => None,
            Some(title) => Some(coerce_text(title)),
        };
        let points = fields.get("points").map(Points::from_value).unwrap_or_default();

        Self { title, points }
    }

    /// The title to write, `fallback` when missing or empty.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => fallback,
        }
    }
}

impl<'de> Deserialize<'de> for SlideRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Text form of a JSON value: strings as they are, null as empty, anything
/// else in its JSON notation.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_points_shapes() {
        assert_eq!(Points::from_value(&json!(["A", "B"])), Points::from(vec!["A", "B"]));
        assert_eq!(Points::from_value(&json!("solo")), Points::from("solo"));
        assert_eq!(Points::from_value(&json!(null)), Points::Empty);
        assert_eq!(Points::from_value(&json!({"a": 1})), Points::Empty);
    }

    #[test]
    fn test_points_coercion() {
        assert_eq!(
            Points::from_value(&json!([1, true, null, "x", 2.5])).paragraphs(),
            vec!["1", "true", "", "x", "2.5"]
        );
        assert_eq!(Points::from_value(&json!(42)).paragraphs(), vec!["42"]);
    }

    #[test]
    fn test_single_and_list_render_alike() {
        assert_eq!(Points::from("solo").paragraphs(), Points::from(vec!["solo"]).paragraphs());
        assert!(Points::from("").paragraphs().is_empty());
        assert!(Points::from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_list_of_empty_strings_renders_nothing() {
        assert_eq!(Points::from(vec![""]).paragraphs(), Points::from("").paragraphs());
        assert!(Points::from(vec!["", ""]).is_empty());
        assert_eq!(Points::from(vec!["", "b"]).paragraphs(), vec!["", "b"]);
    }

    #[test]
    fn test_record_defaults() {
        let record: SlideRecord = serde_json::from_value(json!({"points": ["A"]})).unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.title_or("No Title"), "No Title");

        let record: SlideRecord = serde_json::from_value(json!({"title": "", "points": "solo"})).unwrap();
        assert_eq!(record.title_or("No Title"), "No Title");

        let record: SlideRecord = serde_json::from_value(json!({"title": 7})).unwrap();
        assert_eq!(record.title_or("No Title"), "7");
        assert_eq!(record.points, Points::Empty);
    }

    #[test]
    fn test_non_object_record_is_empty() {
        let records: Vec<SlideRecord> = serde_json::from_value(json!(["just text", {"title": "T"}])).unwrap();
        assert_eq!(records[0], SlideRecord::default());
        assert_eq!(records[1].title.as_deref(), Some("T"));
    }
}
