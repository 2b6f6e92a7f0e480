//! Slide population: one slide per record, title and body filled in.

use crate::assembler::options::AssembleOptions;
use crate::common::Result;
use crate::content::SlideRecord;
use crate::ooxml::pptx::{Package, SlideLayout};
use tracing::{debug, warn};

/// Append a slide made from `layout` and write `record` into it.
///
/// The title goes into the first title placeholder. Points go into the first
/// body or object placeholder that has a text region, one top-level
/// paragraph each. A missing target placeholder is skipped. Returns the
/// slide index.
pub fn populate_slide(
    pkg: &mut Package,
    layout: &SlideLayout,
    record: &SlideRecord,
    options: &AssembleOptions,
) -> Result<usize> {
    let index = pkg.add_slide(layout)?;
    let placeholders = pkg.slide_placeholders(index)?;

    match placeholders.iter().find(|p| p.kind.is_title()) {
        Some(title) => {
            let text = record.title_or(&options.fallback_title).to_string();
            pkg.set_placeholder_text(index, title.shape_id, &[text])?;
        },
        None => warn!(slide = index, layout = %layout.name, "Layout has no title placeholder"),
    }

    let paragraphs = record.points.paragraphs();
    match placeholders
        .iter()
        .find(|p| p.kind.is_body() && p.has_text_frame())
    {
        Some(body) => pkg.set_placeholder_text(index, body.shape_id, &paragraphs)?,
        None if !paragraphs.is_empty() => {
            warn!(slide = index, layout = %layout.name, "Layout has no body placeholder, points dropped");
        },
        None => {},
    }

    debug!(
        slide = index,
        layout = %layout.name,
        paragraphs = paragraphs.len(),
        "Populated slide"
    );
    Ok(index)
}
