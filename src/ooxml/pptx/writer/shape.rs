/// Placeholder shapes written onto new slides.
use crate::common::xml::{escape_run_text, escape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::Placeholder;
use std::fmt::Write as FmtWrite;

/// Run properties on every generated run and break.
const RUN_PROPS: &str = r#"<a:rPr lang="en-US" dirty="0"/>"#;

/// A placeholder shape cloned from a layout slot.
///
/// Only the `<p:ph>` attributes are copied; position, size and text styling
/// are inherited from the layout through them.
#[derive(Debug, Clone)]
pub struct PlaceholderShape {
    pub(crate) shape_id: u32,
    pub(crate) name: String,
    type_attr: Option<String>,
    orient: Option<String>,
    sz: Option<String>,
    idx: Option<u32>,
    has_text: bool,
}

impl PlaceholderShape {
    /// Clone `slot` under a new shape id.
    pub(crate) fn from_layout(shape_id: u32, slot: &Placeholder) -> Self {
        let mut name = String::with_capacity(32);
        name.push_str(slot.kind.shape_basename());
        name.push(' ');
        name.push_str(itoa::Buffer::new().format(shape_id - 1));

        Self {
            shape_id,
            name,
            type_attr: slot.type_attr.clone(),
            orient: slot.orient.clone(),
            sz: slot.sz.clone(),
            idx: slot.idx,
            has_text: slot.kind.takes_text(),
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<p:sp><p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, self.shape_id, escape_xml(&self.name))
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);

        xml.push_str("<p:nvPr><p:ph");
        if let Some(ref kind) = self.type_attr {
            write!(xml, r#" type="{}""#, escape_xml(kind)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        if let Some(ref orient) = self.orient {
            write!(xml, r#" orient="{}""#, escape_xml(orient)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        if let Some(ref sz) = self.sz {
            write!(xml, r#" sz="{}""#, escape_xml(sz)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        if let Some(idx) = self.idx {
            write!(xml, r#" idx="{}""#, idx).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("/></p:nvPr></p:nvSpPr>");
        xml.push_str("<p:spPr/>");

        if self.has_text {
            xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
            write_paragraphs(xml, &[]);
            xml.push_str("</p:txBody>");
        }

        xml.push_str("</p:sp>");
        Ok(())
    }
}

/// Write one `<a:p>` per value, or a single empty `<a:p/>` when there are
/// none (a text body needs at least one paragraph).
pub(crate) fn write_paragraphs(xml: &mut String, paragraphs: &[String]) {
    if paragraphs.is_empty() {
        xml.push_str("<a:p/>");
        return;
    }
    for text in paragraphs {
        write_paragraph(xml, text);
    }
}

/// Top-level paragraph; `\n` and `\v` become `<a:br>` line breaks.
fn write_paragraph(xml: &mut String, text: &str) {
    xml.push_str("<a:p>");
    for (i, segment) in text.split(['\n', '\u{B}']).enumerate() {
        if i > 0 {
            xml.push_str("<a:br>");
            xml.push_str(RUN_PROPS);
            xml.push_str("</a:br>");
        }
        xml.push_str("<a:r>");
        xml.push_str(RUN_PROPS);
        xml.push_str("<a:t>");
        xml.push_str(&escape_run_text(segment));
        xml.push_str("</a:t></a:r>");
    }
    xml.push_str("</a:p>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::shapes::PlaceholderType;

    fn slot(kind: PlaceholderType, type_attr: Option<&str>, idx: Option<u32>) -> Placeholder {
        Placeholder {
            shape_id: 9,
            name: "Layout shape".to_string(),
            kind,
            type_attr: type_attr.map(str::to_string),
            orient: None,
            sz: None,
            idx,
            text_frame: None,
        }
    }

    #[test]
    fn test_title_shape_xml() {
        let shape = PlaceholderShape::from_layout(2, &slot(PlaceholderType::Title, Some("title"), None));
        let mut xml = String::new();
        shape.to_xml(&mut xml).unwrap();

        assert!(xml.contains(r#"<p:cNvPr id="2" name="Title 1"/>"#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains("<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>"));
    }

    #[test]
    fn test_object_shape_keeps_idx_only() {
        let shape = PlaceholderShape::from_layout(3, &slot(PlaceholderType::Object, None, Some(1)));
        let mut xml = String::new();
        shape.to_xml(&mut xml).unwrap();

        assert!(xml.contains(r#"name="Content Placeholder 2""#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
    }

    #[test]
    fn test_picture_shape_has_no_text_body() {
        let shape = PlaceholderShape::from_layout(4, &slot(PlaceholderType::Picture, Some("pic"), Some(13)));
        let mut xml = String::new();
        shape.to_xml(&mut xml).unwrap();
        assert!(!xml.contains("txBody"));
    }

    #[test]
    fn test_paragraph_line_breaks_and_escaping() {
        let mut xml = String::new();
        write_paragraphs(&mut xml, &["a<b\nc".to_string()]);
        assert_eq!(
            xml,
            concat!(
                r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>a&lt;b</a:t></a:r>"#,
                r#"<a:br><a:rPr lang="en-US" dirty="0"/></a:br>"#,
                r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>c</a:t></a:r></a:p>"#,
            )
        );
    }
}
