/// Placeholder shapes of slides, layouts and masters.
use crate::common::shapes::PlaceholderType;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A `p:sp` carrying a `p:ph` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// `p:cNvPr/@id`, unique within its slide
    pub shape_id: u32,
    pub name: String,
    pub kind: PlaceholderType,
    /// `type` attribute exactly as written, `None` when omitted
    pub type_attr: Option<String>,
    pub orient: Option<String>,
    pub sz: Option<String>,
    pub idx: Option<u32>,
    /// `None` when the shape has no `p:txBody`
    pub text_frame: Option<TextFrame>,
}

impl Placeholder {
    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    /// Joined text of the region, empty without one.
    pub fn text(&self) -> String {
        self.text_frame.as_ref().map(TextFrame::text).unwrap_or_default()
    }
}

#[derive(Default)]
struct ShapeState {
    depth: usize,
    shape_id: Option<u32>,
    name: String,
    ph: Option<PhAttrs>,
    text_frame: Option<TextFrame>,
}

#[derive(Default)]
struct PhAttrs {
    type_attr: Option<String>,
    orient: Option<String>,
    sz: Option<String>,
    idx: Option<u32>,
}

/// Placeholders of a slide-like part (`p:sld`, `p:sldLayout`,
/// `p:sldMaster`), in document order.
pub fn parse_placeholders(xml: &[u8]) -> Result<Vec<Placeholder>> {
    let mut reader = Reader::from_reader(xml);
    let mut placeholders = Vec::new();
    let mut depth = 0usize;
    let mut shape: Option<ShapeState> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"sp" if shape.is_none() => {
                        shape = Some(ShapeState {
                            depth,
                            ..Default::default()
                        });
                    },
                    b"txBody" => {
                        if let Some(state) = shape.as_mut() {
                            // parse() consumes through the matching end tag
                            state.text_frame = Some(TextFrame::parse(&mut reader)?);
                            depth -= 1;
                        }
                    },
                    _ => {
                        if let Some(state) = shape.as_mut() {
                            read_shape_attrs(state, &e)?;
                        }
                    },
                }
            },
            Event::Empty(e) => {
                if let Some(state) = shape.as_mut() {
                    if e.local_name().as_ref() == b"txBody" {
                        state.text_frame = Some(TextFrame::default());
                    } else {
                        read_shape_attrs(state, &e)?;
                    }
                }
            },
            Event::End(e) => {
                if e.local_name().as_ref() == b"sp"
                    && let Some(state) = shape.take_if(|s| s.depth == depth)
                    && let Some(ph) = state.ph
                {
                    let kind = ph
                        .type_attr
                        .as_deref()
                        .map_or(PlaceholderType::Object, PlaceholderType::from_ooxml);
                    placeholders.push(Placeholder {
                        shape_id: state.shape_id.unwrap_or(0),
                        name: state.name,
                        kind,
                        type_attr: ph.type_attr,
                        orient: ph.orient,
                        sz: ph.sz,
                        idx: ph.idx,
                        text_frame: state.text_frame,
                    });
                }
                depth = depth.saturating_sub(1);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(placeholders)
}

fn read_shape_attrs(state: &mut ShapeState, e: &BytesStart<'_>) -> Result<()> {
    match e.local_name().as_ref() {
        b"cNvPr" if state.shape_id.is_none() => {
            for attr in e.attributes() {
                let attr = attr?;
                match attr.key.as_ref() {
                    b"id" => state.shape_id = atoi_simd::parse::<u32>(&attr.value).ok(),
                    b"name" => state.name = attr.unescape_value()?.into_owned(),
                    _ => {},
                }
            }
        },
        b"ph" => {
            let mut ph = PhAttrs::default();
            for attr in e.attributes() {
                let attr = attr?;
                match attr.key.as_ref() {
                    b"type" => ph.type_attr = Some(attr.unescape_value()?.into_owned()),
                    b"orient" => ph.orient = Some(attr.unescape_value()?.into_owned()),
                    b"sz" => ph.sz = Some(attr.unescape_value()?.into_owned()),
                    b"idx" => ph.idx = atoi_simd::parse::<u32>(&attr.value).ok(),
                    _ => {},
                }
            }
            state.ph = Some(ph);
        },
        _ => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"<p:sldLayout xmlns:a="a" xmlns:p="p"><p:cSld name="Title and Content"><p:spTree>
        <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>
        <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
            <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>Click to edit</a:t></a:r></a:p></p:txBody></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="4" name="Rectangle"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="5" name="Date"/><p:cNvSpPr/><p:nvPr><p:ph type="dt" sz="half" idx="10"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody/></p:sp>
    </p:spTree></p:cSld></p:sldLayout>"#;

    #[test]
    fn test_parse_layout_placeholders() {
        let phs = parse_placeholders(LAYOUT.as_bytes()).unwrap();
        assert_eq!(phs.len(), 3);

        assert_eq!(phs[0].kind, PlaceholderType::Title);
        assert_eq!(phs[0].shape_id, 2);
        assert_eq!(phs[0].text(), "Click to edit");

        assert_eq!(phs[1].kind, PlaceholderType::Object);
        assert_eq!(phs[1].type_attr, None);
        assert_eq!(phs[1].idx, Some(1));
        assert!(!phs[1].has_text_frame());

        assert_eq!(phs[2].kind, PlaceholderType::Date);
        assert_eq!(phs[2].sz.as_deref(), Some("half"));
        assert!(phs[2].has_text_frame());
    }

    #[test]
    fn test_grouped_placeholder_is_found() {
        let xml = r#"<p:sld xmlns:p="p"><p:cSld><p:spTree><p:grpSp><p:sp><p:nvSpPr><p:cNvPr id="7" name="x"/><p:nvPr><p:ph type="body" idx="3"/></p:nvPr></p:nvSpPr></p:sp></p:grpSp></p:spTree></p:cSld></p:sld>"#;
        let phs = parse_placeholders(xml.as_bytes()).unwrap();
        assert_eq!(phs.len(), 1);
        assert_eq!(phs[0].kind, PlaceholderType::Body);
        assert_eq!(phs[0].idx, Some(3));
    }
}
