use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::fmt::Write as FmtWrite;

// Built once, shared across threads
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so that "&amp;lt;" decodes to "&lt;" and not "<"
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use deckgen::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use deckgen::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Escape a run text value for DrawingML `<a:t>` content.
///
/// On top of the usual entity escaping, characters that XML 1.0 cannot
/// carry (C0 controls other than tab/newline/CR) are written in the
/// `_xHHHH_` form PowerPoint itself uses.
///
/// ```
/// use deckgen::common::xml::escape_run_text;
/// assert_eq!(escape_run_text("a < b"), "a &lt; b");
/// assert_eq!(escape_run_text("bell\u{7}"), "bell_x0007_");
/// ```
pub fn escape_run_text(s: &str) -> String {
    if !s.chars().any(is_xml_illegal) {
        return escape_xml(s);
    }

    let mut cleaned = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if is_xml_illegal(c) {
            // Writing into a String cannot fail
            let _ = write!(cleaned, "_x{:04X}_", c as u32);
        } else {
            cleaned.push(c);
        }
    }
    escape_xml(&cleaned)
}

/// Resolve a general entity or character reference body (the part between
/// `&` and `;`) to its text.
///
/// Returns `None` for entities that are neither predefined nor numeric.
///
/// ```
/// use deckgen::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
/// assert_eq!(resolve_entity("#x41").as_deref(), Some("A"));
/// assert_eq!(resolve_entity("#66").as_deref(), Some("B"));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        },
    };
    Some(resolved.to_string())
}

#[inline]
fn is_xml_illegal(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_run_text_keeps_tabs_and_newlines() {
        assert_eq!(escape_run_text("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_escape_run_text_mixes_entities_and_controls() {
        assert_eq!(escape_run_text("x&\u{1}"), "x&amp;_x0001_");
    }

    #[test]
    fn test_resolve_entity_rejects_garbage() {
        assert_eq!(resolve_entity("#xZZ"), None);
        assert_eq!(resolve_entity(""), None);
    }
}
