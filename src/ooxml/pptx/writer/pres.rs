/// Edits to `presentation.xml`.
///
/// The presentation part of a donor carries a lot this crate does not model
/// (sections, custom shows, extension lists, vendor namespaces), so it is
/// never regenerated. Only the elements that change are spliced in place.
use crate::common::xml::{find_element_spans, path_is, splice};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::parts::presentation::{SlideId, namespace_prefixes};
use std::fmt::Write as FmtWrite;

/// Elements `<p:sldIdLst>` must follow, in schema order.
const SLIDE_ID_LIST_PREDECESSORS: [&[u8]; 3] = [b"sldMasterIdLst", b"notesMasterIdLst", b"handoutMasterIdLst"];

/// Rewrite `<p:sldIdLst>` to hold exactly `slide_ids`.
///
/// A missing list is inserted after the last master id list; an empty one
/// is written as an empty element.
pub fn write_slide_id_list(xml: &[u8], slide_ids: &[SlideId]) -> Result<Vec<u8>> {
    let prefixes = namespace_prefixes(xml)?;
    let list_name = prefixes.pml("sldIdLst");

    let mut list = String::with_capacity(32 + slide_ids.len() * 48);
    if slide_ids.is_empty() {
        write!(list, "<{list_name}/>").map_err(|e| OoxmlError::Xml(e.to_string()))?;
    } else {
        write!(list, "<{list_name}>").map_err(|e| OoxmlError::Xml(e.to_string()))?;
        let id_name = prefixes.pml("sldId");
        for slide_id in slide_ids {
            write!(
                list,
                r#"<{} id="{}" {}:id="{}"/>"#,
                id_name, slide_id.id, prefixes.rel, slide_id.r_id
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        write!(list, "</{list_name}>").map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }

    let existing = find_element_spans(xml, |s| path_is(s, &[b"presentation", b"sldIdLst"]))?;
    if let Some(span) = existing.into_iter().next() {
        return Ok(splice(xml, vec![(span, list.into_bytes())]));
    }

    let anchor = find_element_spans(xml, |s| {
        s.len() == 2 && s[0] == b"presentation" && SLIDE_ID_LIST_PREDECESSORS.contains(&s[1].as_slice())
    })?
    .into_iter()
    .map(|span| span.end)
    .max()
    .ok_or_else(|| OoxmlError::InvalidFormat("presentation has no sldMasterIdLst".to_string()))?;

    Ok(splice(xml, vec![(anchor..anchor, list.into_bytes())]))
}

/// Drop slide references held outside `<p:sldIdLst>`: the `p14:sldId`
/// entries of the section list and the whole `<p:custShowLst>`.
///
/// Returns the edited XML and the number of section entries removed.
pub fn strip_section_refs(xml: &[u8]) -> Result<(Vec<u8>, usize)> {
    let section_refs = find_element_spans(xml, |s| {
        s.last().is_some_and(|n| n == b"sldId") && s.iter().any(|n| n == b"sectionLst")
    })?;
    let custom_shows = find_element_spans(xml, |s| path_is(s, &[b"presentation", b"custShowLst"]))?;

    let removed = section_refs.len();
    if removed == 0 && custom_shows.is_empty() {
        return Ok((xml.to_vec(), 0));
    }

    let edits = section_refs
        .into_iter()
        .chain(custom_shows)
        .map(|span| (span, Vec::new()))
        .collect();
    Ok((splice(xml, edits), removed))
}
