//! Slide purge: empty a donor of its own slides, keeping masters, layouts
//! and theme.

use crate::assembler::options::AssembleOptions;
use crate::common::Result;
use crate::ooxml::pptx::Package;
use tracing::{info, warn};

/// What a purge removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    pub slides_removed: usize,
    /// Slide parts and whatever only they referenced (notes, media)
    pub parts_dropped: usize,
    pub section_refs_removed: usize,
}

/// Remove every slide of `pkg`.
///
/// Slide list entries and their relationships go together through
/// [`Package::remove_slide_pairs`]. Slide relationships the list never
/// named are removed as well; parts left unreachable are then dropped.
/// A package without slides is left as it is.
pub fn purge_slides(pkg: &mut Package, options: &AssembleOptions) -> Result<PurgeSummary> {
    let pairs = pkg.slide_refs();
    if pairs.is_empty() && pkg.unlisted_slide_rels()?.is_empty() {
        return Ok(PurgeSummary::default());
    }

    pkg.remove_slide_pairs(&pairs)?;
    let unlisted = pkg.remove_unlisted_slide_rels()?;
    if unlisted > 0 {
        warn!(count = unlisted, "Removed slide relationships missing from the slide list");
    }
    let dropped = pkg.drop_unreachable_parts()?;

    let section_refs_removed = if options.clean_section_refs {
        pkg.strip_section_refs()?
    } else {
        0
    };
    if section_refs_removed > 0 {
        warn!(count = section_refs_removed, "Removed section references to purged slides");
    }

    let summary = PurgeSummary {
        slides_removed: pairs.len() + unlisted,
        parts_dropped: dropped.len(),
        section_refs_removed,
    };
    info!(
        slides = summary.slides_removed,
        parts = summary.parts_dropped,
        "Purged donor slides"
    );
    Ok(summary)
}
