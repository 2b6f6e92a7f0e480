//! Byte-range editing of XML parts.
//!
//! PresentationML parts taken from a donor carry far more markup than this
//! crate models (extension lists, vendor namespaces, comments). Rather than
//! round-tripping them through a DOM, edits locate the exact byte span of an
//! element with a streaming quick-xml pass and splice replacement bytes in,
//! leaving every other byte untouched.

use memchr::memrchr;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::ops::Range;

/// Find the byte spans of every element whose local-name path matches.
///
/// `matches` receives the stack of local names from the root element down to
/// the candidate element (inclusive). Elements nested inside an already
/// matched element are not reported separately.
pub fn find_element_spans<F>(xml: &[u8], matches: F) -> Result<Vec<Range<usize>>, quick_xml::Error>
where
    F: Fn(&[Vec<u8>]) -> bool,
{
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut open: Option<(usize, usize)> = None;
    let mut spans = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let after = reader.buffer_position() as usize;
        match event {
            Event::Start(e) => {
                stack.push(e.local_name().as_ref().to_vec());
                if open.is_none() && matches(&stack) {
                    open = Some((tag_start(xml, after), stack.len()));
                }
            },
            Event::Empty(e) => {
                stack.push(e.local_name().as_ref().to_vec());
                if open.is_none() && matches(&stack) {
                    spans.push(tag_start(xml, after)..after);
                }
                stack.pop();
            },
            Event::End(_) => {
                if let Some((start, depth)) = open
                    && depth == stack.len()
                {
                    spans.push(start..after);
                    open = None;
                }
                stack.pop();
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(spans)
}

/// Apply non-overlapping replacements to `xml`.
///
/// An empty range inserts at that offset.
pub fn splice(xml: &[u8], mut edits: Vec<(Range<usize>, Vec<u8>)>) -> Vec<u8> {
    edits.sort_by_key(|(range, _)| (range.start, range.end));

    let mut out = Vec::with_capacity(xml.len() + edits.iter().map(|(_, b)| b.len()).sum::<usize>());
    let mut cursor = 0;
    for (range, bytes) in edits {
        if range.start < cursor {
            continue;
        }
        out.extend_from_slice(&xml[cursor..range.start]);
        out.extend_from_slice(&bytes);
        cursor = range.end;
    }
    out.extend_from_slice(&xml[cursor..]);
    out
}

/// Local-name path helper: does `stack` equal `path`?
#[inline]
pub fn path_is(stack: &[Vec<u8>], path: &[&[u8]]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a.as_slice() == *b)
}

/// Offset of the `<` opening the tag that ends right before `after`.
///
/// `<` cannot appear unescaped inside attribute values, so the last one
/// before the end of a start tag is that tag's own.
#[inline]
pub(crate) fn tag_start(xml: &[u8], after: usize) -> usize {
    memrchr(b'<', &xml[..after.min(xml.len())]).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &[u8] = br#"<?xml version="1.0"?>
<p:presentation xmlns:p="urn:p"><p:sldMasterIdLst><p:sldMasterId id="1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256"/><p:sldId id="257"/></p:sldIdLst><p:sldSz cx="1" cy="2"/></p:presentation>"#;

    #[test]
    fn test_find_container_span() {
        let spans = find_element_spans(XML, |s| path_is(s, &[b"presentation", b"sldIdLst"])).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &XML[spans[0].clone()],
            br#"<p:sldIdLst><p:sldId id="256"/><p:sldId id="257"/></p:sldIdLst>"#.as_slice()
        );
    }

    #[test]
    fn test_find_empty_element_spans() {
        let spans = find_element_spans(XML, |s| s.last().is_some_and(|n| n == b"sldId")).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(&XML[spans[1].clone()], br#"<p:sldId id="257"/>"#.as_slice());
    }

    #[test]
    fn test_splice_replace_and_insert() {
        let spans = find_element_spans(XML, |s| path_is(s, &[b"presentation", b"sldIdLst"])).unwrap();
        let sz = find_element_spans(XML, |s| path_is(s, &[b"presentation", b"sldSz"])).unwrap();
        let out = splice(
            XML,
            vec![
                (spans[0].clone(), b"<p:sldIdLst/>".to_vec()),
                (sz[0].end..sz[0].end, b"<p:notesSz cx=\"3\" cy=\"4\"/>".to_vec()),
            ],
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("</p:sldMasterIdLst><p:sldIdLst/><p:sldSz"));
        assert!(text.contains("<p:notesSz cx=\"3\" cy=\"4\"/></p:presentation>"));
    }
}
