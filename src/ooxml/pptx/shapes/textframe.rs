/// Text regions (`p:txBody`) of placeholder shapes.
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One DrawingML paragraph, flattened to its indent level and text.
///
/// Line breaks (`a:br`) inside the paragraph read back as `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub level: u32,
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            level: 0,
            text: text.into(),
        }
    }
}

/// The text region of a shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    /// Parse a text body starting right after its `<p:txBody>` start tag.
    ///
    /// Consumes events up to and including the matching end tag. A body
    /// holding nothing but one run-less paragraph is an empty region and
    /// reads back with zero paragraphs.
    pub(crate) fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut paragraphs = Vec::new();
        let mut runs_in_body = 0usize;
        let mut current: Option<Paragraph> = None;
        let mut in_text = false;
        let mut depth = 1usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"p" => current = Some(Paragraph::new(String::new())),
                        b"pPr" => set_level(&mut current, &e)?,
                        b"r" | b"fld" => runs_in_body += 1,
                        b"t" => in_text = true,
                        b"br" => push_break(&mut current, &mut runs_in_body),
                        _ => {},
                    }
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"p" => paragraphs.push(Paragraph::new(String::new())),
                    b"pPr" => set_level(&mut current, &e)?,
                    b"br" => push_break(&mut current, &mut runs_in_body),
                    _ => {},
                },
                Event::Text(e) if in_text => {
                    if let Some(p) = current.as_mut() {
                        p.text.push_str(&unescape_xml(std::str::from_utf8(&e)?));
                    }
                },
                Event::GeneralRef(e) if in_text => {
                    let name = std::str::from_utf8(&e)?;
                    if let Some(p) = current.as_mut() {
                        match resolve_entity(name) {
                            Some(resolved) => p.text.push_str(&resolved),
                            None => {
                                p.text.push('&');
                                p.text.push_str(name);
                                p.text.push(';');
                            },
                        }
                    }
                },
                Event::CData(e) if in_text => {
                    if let Some(p) = current.as_mut() {
                        p.text.push_str(std::str::from_utf8(&e)?);
                    }
                },
                Event::End(e) => {
                    depth -= 1;
                    match e.local_name().as_ref() {
                        b"t" => in_text = false,
                        b"p" => paragraphs.extend(current.take()),
                        _ => {},
                    }
                    if depth == 0 {
                        break;
                    }
                },
                Event::Eof => return Err(OoxmlError::Xml("Unexpected end of text body".to_string())),
                _ => {},
            }
        }

        if runs_in_body == 0 && paragraphs.len() == 1 && paragraphs[0].text.is_empty() {
            paragraphs.clear();
        }
        Ok(Self { paragraphs })
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

fn set_level(current: &mut Option<Paragraph>, e: &BytesStart<'_>) -> Result<()> {
    if let Some(p) = current.as_mut() {
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"lvl" {
                p.level = atoi_simd::parse::<u32>(&attr.value).unwrap_or(0);
            }
        }
    }
    Ok(())
}

fn push_break(current: &mut Option<Paragraph>, runs: &mut usize) {
    if let Some(p) = current.as_mut() {
        p.text.push('\n');
        *runs += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> TextFrame {
        let xml = format!("<p:txBody>{}</p:txBody><tail/>", body);
        let mut reader = Reader::from_reader(xml.as_bytes());
        // Step past the txBody start tag
        reader.read_event().unwrap();
        let frame = TextFrame::parse(&mut reader).unwrap();
        assert!(matches!(reader.read_event().unwrap(), Event::Empty(_)));
        frame
    }

    #[test]
    fn test_paragraphs_with_levels_and_breaks() {
        let frame = parse(
            r#"<a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>Intro</a:t></a:r></a:p><a:p><a:pPr lvl="2"/><a:r><a:t>one</a:t></a:r><a:br/><a:r><a:t>two</a:t></a:r></a:p>"#,
        );
        assert_eq!(
            frame.paragraphs(),
            &[
                Paragraph::new("Intro"),
                Paragraph {
                    level: 2,
                    text: "one\ntwo".into()
                }
            ]
        );
    }

    #[test]
    fn test_entities_are_resolved() {
        let frame = parse("<a:p><a:r><a:t>R&amp;D &lt;2&gt; &#x41;</a:t></a:r></a:p>");
        assert_eq!(frame.text(), "R&D <2> A");
    }

    #[test]
    fn test_single_empty_paragraph_is_empty_region() {
        assert!(parse("<a:bodyPr/><a:lstStyle/><a:p/>").is_empty());
        assert!(parse(r#"<a:bodyPr/><a:p><a:endParaRPr lang="en-US"/></a:p>"#).is_empty());
    }

    #[test]
    fn test_empty_run_counts_as_paragraph() {
        let frame = parse("<a:p><a:r><a:t></a:t></a:r></a:p>");
        assert_eq!(frame.paragraphs().len(), 1);
    }
}
