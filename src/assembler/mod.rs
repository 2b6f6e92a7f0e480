//! Template-aware deck assembly.
//!
//! [`assemble`] runs the whole pipeline for one deck:
//!
//! 1. **Style resolution**: open the donor (or the built-in default) and
//!    pick the single layout all slides are made from ([`resolve`])
//! 2. **Slide purge**: remove the donor's own slides ([`purge`])
//! 3. **Slide population**: one slide per record ([`populate`])
//! 4. **Serialization**: write the package to the output path
//!
//! # Example
//!
//! ```rust,no_run
//! use deckgen::assembler::{AssembleOptions, assemble};
//! use deckgen::content::SlideRecord;
//!
//! let records = vec![
//!     SlideRecord::new("Intro", vec!["A", "B"]),
//!     SlideRecord::new("", "solo"),
//! ];
//! assemble(&records, "deck.pptx", None, &AssembleOptions::default())?;
//! # Ok::<(), deckgen::Error>(())
//! ```

pub mod options;
pub mod populate;
pub mod purge;
pub mod resolve;


pub use options::AssembleOptions;
pub use populate::populate_slide;
pub use purge::{PurgeSummary, purge_slides};
pub use resolve::{ResolutionStrategy, ResolvedLayout, resolve_layout};

use crate::common::{Error, Result};
use crate::content::{ContentProvider, SlideRecord};
use crate::ooxml::pptx::Package;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build a deck from `records` and write it to `output_path`.
///
/// With a `donor_path`, the donor's masters, layouts and theme are kept and
/// its slides removed; without one the built-in default template is used.
/// Returns the output path.
///
/// # Errors
///
/// - [`Error::DonorCorrupt`] when the donor cannot be opened as a
///   presentation or its slide list is inconsistent
/// - [`Error::NoLayout`] when there is no layout to build slides from
/// - [`Error::Io`] when writing the output fails
///
/// No file is written at `output_path` on error.
pub fn assemble<P: AsRef<Path>>(
    records: &[SlideRecord],
    output_path: P,
    donor_path: Option<&Path>,
    options: &AssembleOptions,
) -> Result<PathBuf> {
    let output_path = output_path.as_ref();

    let (mut pkg, layouts) = match donor_path {
        Some(donor) => {
            let pkg = Package::open(donor).map_err(|e| Error::donor_corrupt(donor, e))?;
            let layouts = pkg.slide_layouts().map_err(|e| Error::donor_corrupt(donor, e))?;
            (pkg, layouts)
        },
        None => {
            let pkg = Package::new()?;
            let layouts = pkg.slide_layouts()?;
            (pkg, layouts)
        },
    };

    let resolved = resolve_layout(layouts, options)?;

    if let Some(donor) = donor_path {
        purge_slides(&mut pkg, options).map_err(|e| Error::donor_corrupt(donor, e))?;
    }

    for record in records {
        populate_slide(&mut pkg, &resolved.layout, record, options)?;
    }

    pkg.save(output_path)?;
    info!(
        path = %output_path.display(),
        slides = records.len(),
        layout = %resolved.layout.name,
        "Assembled deck"
    );
    Ok(output_path.to_path_buf())
}

/// Produce records with `provider` and assemble them.
///
/// An empty result from the provider is a [`Error::ContentGeneration`]
/// failure.
pub fn generate_deck<C: ContentProvider + ?Sized, P: AsRef<Path>>(
    provider: &C,
    text: &str,
    guidance: &str,
    output_path: P,
    donor_path: Option<&Path>,
    options: &AssembleOptions,
) -> Result<PathBuf> {
    let records = provider.produce(text, guidance)?;
    if records.is_empty() {
        return Err(Error::ContentGeneration(
            "provider failed to generate content".to_string(),
        ));
    }
    assemble(&records, output_path, donor_path, options)
}

/// Output file name for a user-supplied deck name: spaces become
/// underscores and `.pptx` is appended.
///
/// ```rust
/// assert_eq!(deckgen::assembler::safe_filename("Quarterly review"), "Quarterly_review.pptx");
/// ```
pub fn safe_filename(name: &str) -> String {
    let mut filename = name.replace(' ', "_");
    filename.push_str(".pptx");
    filename
}
