//! Parts of a PowerPoint package.
//!
//! Thin borrowing wrappers over OPC parts that read the PresentationML a
//! part carries: the presentation's id lists, master and layout names and
//! the placeholders on layouts and slides.

pub mod presentation;
pub mod slide;

pub use presentation::{NamespacePrefixes, PresentationPart, SlideId};
pub use slide::{SlideLayoutPart, SlideMasterPart, SlidePart};

use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

/// `name` attribute of the first `<p:cSld>`, empty when unnamed.
pub(crate) fn csld_name(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"cSld" => {
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.as_ref() == b"name" {
                        return Ok(attr.unescape_value()?.into_owned());
                    }
                }
                return Ok(String::new());
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(String::new())
}

/// `(id, r:id)` of every `element` in document order.
///
/// `sldId`, `sldMasterId` and `sldLayoutId` all carry an unprefixed numeric
/// `id` next to a relationship-namespaced `id`; the prefix tells them apart.
pub(crate) fn id_list_entries(xml: &[u8], element: &[u8]) -> Result<Vec<(Option<u32>, Option<String>)>> {
    let mut reader = Reader::from_reader(xml);
    let mut entries = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == element => {
                let mut id = None;
                let mut r_id = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.local_name().as_ref() != b"id" {
                        continue;
                    }
                    if attr.key.prefix().is_some() {
                        r_id = Some(attr.unescape_value()?.into_owned());
                    } else {
                        id = atoi_simd::parse::<u32>(&attr.value).ok();
                    }
                }
                entries.push((id, r_id));
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(entries)
}
