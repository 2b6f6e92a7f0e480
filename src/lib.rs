//! Deckgen - template-aware PowerPoint deck assembly
//!
//! Turns an ordered list of slide records (a title plus bullet points) into a
//! `.pptx` presentation. Styling (masters, layouts, theme, fonts) comes from
//! an optional donor presentation or template whose own slides are removed,
//! or from a built-in default template.
//!
//! # Features
//!
//! - **Style resolution**: one "title and content" layout chosen per deck,
//!   with a fallback chain when the donor does not follow convention
//! - **Safe slide purge**: donor slides leave together with their
//!   relationships and every part only they used
//! - **Tolerant content**: loosely-typed records are defaulted and coerced,
//!   never rejected
//! - **Atomic save**: the output file appears complete or not at all
//!
//! # Example - Assembling a deck
//!
//! ```no_run
//! use deckgen::assembler::{AssembleOptions, assemble};
//! use deckgen::content::SlideRecord;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records: Vec<SlideRecord> = serde_json::from_str(
//!     r#"[{"title": "Intro", "points": ["A", "B"]}, {"title": "", "points": "solo"}]"#,
//! )?;
//!
//! assemble(
//!     &records,
//!     "deck.pptx",
//!     Some(Path::new("corporate.potx")),
//!     &AssembleOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a deck back
//!
//! ```no_run
//! use deckgen::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("deck.pptx")?;
//! for slide in pkg.slides()? {
//!     println!("{:?}", slide.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The library emits `tracing` events for each assembly phase and never
//! installs a subscriber itself.

/// Deck assembly: style resolution, slide purge, slide population
pub mod assembler;

/// Error types, XML helpers and the placeholder type shared by all layers
pub mod common;

/// Slide records and content providers
pub mod content;

/// OOXML package and PresentationML support
pub mod ooxml;

pub use assembler::{AssembleOptions, assemble, generate_deck, safe_filename};
pub use common::{Error, PlaceholderType, Result};
pub use content::{ContentProvider, Points, SlideRecord};
