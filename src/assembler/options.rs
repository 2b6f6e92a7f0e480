use serde::Deserialize;

/// Title written when a record has none.
pub const DEFAULT_FALLBACK_TITLE: &str = "No Title";

/// Options for deck assembly.
///
/// Built with the `with_*` methods or deserialized from JSON, where every
/// field is optional:
///
/// ```rust
/// use deckgen::assembler::AssembleOptions;
///
/// let options: AssembleOptions = serde_json::from_str(r#"{"fallback_title": "Untitled"}"#).unwrap();
/// assert_eq!(options.fallback_title, "Untitled");
/// assert_eq!(options.preferred_layout_index, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    /// Title for records whose title is missing or empty
    pub fallback_title: String,
    /// Layout tried first, by position across all masters
    pub preferred_layout_index: usize,
    /// Also drop section list entries and custom shows of a donor
    pub clean_section_refs: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            preferred_layout_index: 1,
            clean_section_refs: true,
        }
    }
}

impl AssembleOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Position of the layout to try before scanning for a title and body
    /// layout. Position 1 is "Title and Content" in PowerPoint's own
    /// templates.
    pub fn with_preferred_layout_index(mut self, index: usize) -> Self {
        self.preferred_layout_index = index;
        self
    }

    pub fn with_clean_section_refs(mut self, clean: bool) -> Self {
        self.clean_section_refs = clean;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = AssembleOptions::new()
            .with_fallback_title("Untitled")
            .with_preferred_layout_index(0)
            .with_clean_section_refs(false);
        assert_eq!(options.fallback_title, "Untitled");
        assert_eq!(options.preferred_layout_index, 0);
        assert!(!options.clean_section_refs);
    }

    #[test]
    fn test_empty_json_is_default() {
        let options: AssembleOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AssembleOptions::default());
    }
}
