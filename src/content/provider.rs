//! Content providers turn free text plus guidance into slide records.
//!
//! The model call itself lives outside this crate. [`JsonContentProvider`]
//! wraps any function that returns the model's raw response and decodes it.

use crate::common::{Error, Result};
use crate::content::record::SlideRecord;
use serde_json::Value;
use tracing::debug;

/// Produces the ordered slide records for a deck.
pub trait ContentProvider {
    /// Records for `text`, shaped by `guidance` (audience, tone, length).
    ///
    /// Fails with [`Error::ContentGeneration`] when the upstream call fails
    /// or returns data that cannot be decoded.
    fn produce(&self, text: &str, guidance: &str) -> Result<Vec<SlideRecord>>;
}

/// Hands out a fixed list of records regardless of input.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    records: Vec<SlideRecord>,
}

impl StaticContentProvider {
    pub fn new(records: Vec<SlideRecord>) -> Self {
        Self { records }
    }
}

impl ContentProvider for StaticContentProvider {
    fn produce(&self, _text: &str, _guidance: &str) -> Result<Vec<SlideRecord>> {
        Ok(self.records.clone())
    }
}

/// Decodes the JSON a completion function returns.
pub struct JsonContentProvider<F> {
    complete: F,
}

impl<F> JsonContentProvider<F>
where
    F: Fn(&str, &str) -> Result<String>,
{
    pub fn new(complete: F) -> Self {
        Self { complete }
    }
}

impl<F> ContentProvider for JsonContentProvider<F>
where
    F: Fn(&str, &str) -> Result<String>,
{
    fn produce(&self, text: &str, guidance: &str) -> Result<Vec<SlideRecord>> {
        let response = (self.complete)(text, guidance)?;
        parse_slide_records(&response)
    }
}

/// Decode a provider response.
///
/// Accepts a bare array of records, an object with a `slides` array, and
/// either of those wrapped in a Markdown code fence.
pub fn parse_slide_records(response: &str) -> Result<Vec<SlideRecord>> {
    let body = strip_code_fence(response.trim());
    let value: Value = serde_json::from_str(body)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("slides") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::ContentGeneration(
                    "response object has no \"slides\" array".to_string(),
                ));
            },
        },
        _ => {
            return Err(Error::ContentGeneration(
                "response is neither an array nor an object".to_string(),
            ));
        },
    };

    debug!(records = items.len(), "Decoded provider response");
    Ok(items.iter().map(SlideRecord::from_value).collect())
}

/// Contents of a ```` ``` ```` fence (with or without a language tag), or
/// the input unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::record::Points;

    #[test]
    fn test_bare_array() {
        let records = parse_slide_records(r#"[{"title": "Intro", "points": ["A", "B"]}]"#).unwrap();
        assert_eq!(records, vec![SlideRecord::new("Intro", vec!["A", "B"])]);
    }

    #[test]
    fn test_slides_object_in_fence() {
        let response = "```json\n{\"slides\": [{\"title\": \"T\", \"points\": \"solo\"}]}\n```\n";
        let records = parse_slide_records(response).unwrap();
        assert_eq!(records[0].points, Points::from("solo"));
    }

    #[test]
    fn test_unusable_responses() {
        assert!(matches!(
            parse_slide_records("not json"),
            Err(Error::ContentGeneration(_))
        ));
        assert!(matches!(
            parse_slide_records(r#"{"pages": []}"#),
            Err(Error::ContentGeneration(_))
        ));
        assert!(matches!(parse_slide_records("42"), Err(Error::ContentGeneration(_))));
    }

    #[test]
    fn test_json_provider_passes_through_failure() {
        let provider = JsonContentProvider::new(|_: &str, _: &str| -> Result<String> {
            Err(Error::ContentGeneration("model unavailable".to_string()))
        });
        assert!(provider.produce("text", "guidance").is_err());

        let provider = JsonContentProvider::new(|text: &str, _: &str| -> Result<String> {
            Ok(format!(r#"[{{"title": "{text}"}}]"#))
        });
        let records = provider.produce("Topic", "").unwrap();
        assert_eq!(records[0].title.as_deref(), Some("Topic"));
    }
}
