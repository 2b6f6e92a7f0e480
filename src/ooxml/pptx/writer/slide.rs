/// Slide XML generation and text editing.
use crate::common::xml::splice::{splice, tag_start};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::Placeholder;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::ops::Range;

use super::shape::{PlaceholderShape, write_paragraphs};

/// A slide about to be instantiated from a layout.
#[derive(Debug, Clone)]
pub struct NewSlide {
    shapes: Vec<PlaceholderShape>,
}

impl NewSlide {
    /// Clone the layout's placeholder slots in document order.
    ///
    /// Date, footer and slide number slots stay on the layout. Shape ids
    /// start at 2; id 1 is the shape tree itself.
    pub fn from_layout(slots: &[Placeholder]) -> Self {
        let shapes = slots
            .iter()
            .filter(|slot| slot.kind.is_cloneable())
            .zip(2u32..)
            .map(|(slot, shape_id)| PlaceholderShape::from_layout(shape_id, slot))
            .collect();
        Self { shapes }
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.shapes.len() * 384);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#);
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for shape in &self.shapes {
            shape.to_xml(&mut xml)?;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

/// Where the paragraphs of one shape's text body live.
#[derive(Debug, Default)]
struct TextBodySpans {
    paragraphs: Vec<Range<usize>>,
    /// Offset of `</p:txBody>`
    close_tag: Option<usize>,
    /// `<p:txBody/>` written without content
    empty_element: Option<(Range<usize>, String)>,
}

/// Replace every paragraph in the text body of shape `shape_id` with one
/// paragraph per value.
///
/// `bodyPr` and `lstStyle` are kept; an empty `paragraphs` leaves a single
/// empty paragraph, which reads back as no text.
pub fn replace_text_body(xml: &[u8], shape_id: u32, paragraphs: &[String]) -> Result<Vec<u8>> {
    let spans = locate_text_body(xml, shape_id)?;

    let mut body = String::with_capacity(64 + paragraphs.iter().map(|p| p.len() + 96).sum::<usize>());
    write_paragraphs(&mut body, paragraphs);

    let mut edits: Vec<(Range<usize>, Vec<u8>)> = Vec::with_capacity(spans.paragraphs.len() + 1);
    if let Some((range, qname)) = spans.empty_element {
        let replacement = format!("<{qname}><a:bodyPr/><a:lstStyle/>{body}</{qname}>");
        edits.push((range, replacement.into_bytes()));
    } else if let Some(close) = spans.close_tag {
        edits.extend(spans.paragraphs.into_iter().map(|range| (range, Vec::new())));
        edits.push((close..close, body.into_bytes()));
    } else {
        return Err(OoxmlError::InvalidFormat(format!("shape {shape_id} has no text body")));
    }

    Ok(splice(xml, edits))
}

fn locate_text_body(xml: &[u8], shape_id: u32) -> Result<TextBodySpans> {
    let mut reader = Reader::from_reader(xml);
    let mut depth = 0usize;
    // depth of the open <p:sp> and whether its cNvPr id matched
    let mut shape: Option<(usize, Option<bool>)> = None;
    let mut body_depth: Option<usize> = None;
    let mut paragraph_start: Option<usize> = None;
    let mut spans = TextBodySpans::default();

    loop {
        let event = reader.read_event()?;
        let after = reader.buffer_position() as usize;
        match event {
            Event::Start(e) => {
                depth += 1;
                let local = e.local_name();
                match local.as_ref() {
                    b"sp" if shape.is_none() => shape = Some((depth, None)),
                    b"cNvPr" => matched_id(&mut shape, &e, shape_id)?,
                    b"txBody" if matches!(shape, Some((_, Some(true)))) => body_depth = Some(depth),
                    b"p" if body_depth.is_some_and(|d| d + 1 == depth) => {
                        paragraph_start = Some(tag_start(xml, after));
                    },
                    _ => {},
                }
            },
            Event::Empty(e) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"cNvPr" => matched_id(&mut shape, &e, shape_id)?,
                    b"txBody" if matches!(shape, Some((_, Some(true)))) => {
                        let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        spans.empty_element = Some((tag_start(xml, after)..after, qname));
                        return Ok(spans);
                    },
                    b"p" if body_depth.is_some_and(|d| d == depth) => {
                        spans.paragraphs.push(tag_start(xml, after)..after);
                    },
                    _ => {},
                }
            },
            Event::End(e) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"p" if body_depth.is_some_and(|d| d + 1 == depth) => {
                        if let Some(start) = paragraph_start.take() {
                            spans.paragraphs.push(start..after);
                        }
                    },
                    b"txBody" if body_depth == Some(depth) => {
                        spans.close_tag = Some(tag_start(xml, after));
                        return Ok(spans);
                    },
                    b"sp" if shape.is_some_and(|(d, _)| d == depth) => shape = None,
                    _ => {},
                }
                depth = depth.saturating_sub(1);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(spans)
}

/// Record whether the first `cNvPr` of the open shape carries `shape_id`.
fn matched_id(
    shape: &mut Option<(usize, Option<bool>)>,
    e: &quick_xml::events::BytesStart<'_>,
    shape_id: u32,
) -> Result<()> {
    if let Some((_, matched @ None)) = shape.as_mut() {
        let mut is_match = false;
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"id" {
                is_match = atoi_simd::parse::<u32>(&attr.value).ok() == Some(shape_id);
            }
        }
        *matched = Some(is_match);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::shapes::PlaceholderType;
    use crate::ooxml::pptx::shapes::parse_placeholders;

    fn layout_slots() -> Vec<Placeholder> {
        let layout = r#"<p:sldLayout xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="4" name="Date 3"/><p:nvPr><p:ph type="dt" sz="half" idx="10"/></p:nvPr></p:nvSpPr></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="5" name="Footer 4"/><p:nvPr><p:ph type="ftr" sz="quarter" idx="11"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree></p:cSld></p:sldLayout>"#;
        parse_placeholders(layout.as_bytes()).unwrap()
    }

    #[test]
    fn test_new_slide_skips_footer_family() {
        let slide = NewSlide::from_layout(&layout_slots());
        assert_eq!(slide.shape_count(), 2);

        let xml = slide.to_xml().unwrap();
        let phs = parse_placeholders(xml.as_bytes()).unwrap();
        assert_eq!(phs.len(), 2);
        assert_eq!(phs[0].kind, PlaceholderType::Title);
        assert_eq!(phs[0].shape_id, 2);
        assert_eq!(phs[1].kind, PlaceholderType::Object);
        assert_eq!(phs[1].shape_id, 3);
        assert!(phs.iter().all(|p| p.has_text_frame() && p.text().is_empty()));
    }

    #[test]
    fn test_replace_text_body_targets_one_shape() {
        let xml = NewSlide::from_layout(&layout_slots()).to_xml().unwrap();

        let xml = replace_text_body(xml.as_bytes(), 2, &["Intro".to_string()]).unwrap();
        let xml = replace_text_body(&xml, 3, &["A".to_string(), "B & C".to_string()]).unwrap();

        let phs = parse_placeholders(&xml).unwrap();
        assert_eq!(phs[0].text(), "Intro");
        let body = phs[1].text_frame.as_ref().unwrap();
        let texts: Vec<&str> = body.paragraphs().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B & C"]);
        assert!(body.paragraphs().iter().all(|p| p.level == 0));
    }

    #[test]
    fn test_replace_clears_previous_paragraphs() {
        let xml = NewSlide::from_layout(&layout_slots()).to_xml().unwrap();
        let xml = replace_text_body(xml.as_bytes(), 3, &["old 1".to_string(), "old 2".to_string()]).unwrap();
        let xml = replace_text_body(&xml, 3, &[]).unwrap();

        let phs = parse_placeholders(&xml).unwrap();
        assert!(phs[1].text_frame.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_replace_fills_empty_text_body_element() {
        let xml = br#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="T"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody/></p:sp></p:spTree></p:cSld></p:sld>"#;
        let out = replace_text_body(xml, 2, &["Hi".to_string()]).unwrap();
        assert_eq!(parse_placeholders(&out).unwrap()[0].text(), "Hi");
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let xml = NewSlide::from_layout(&layout_slots()).to_xml().unwrap();
        assert!(replace_text_body(xml.as_bytes(), 42, &["x".to_string()]).is_err());
    }
}
