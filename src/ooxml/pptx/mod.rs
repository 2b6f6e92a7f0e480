//! PowerPoint (.pptx) presentation support.
//!
//! Built on the OPC layer in [`crate::ooxml::opc`]:
//!
//! - [`Package`]: a presentation open for editing (slide list, layouts,
//!   slides, save)
//! - [`parts`]: read-only views of presentation, master, layout and slide
//!   parts
//! - [`shapes`]: placeholder shapes and their text regions
//! - [`writer`]: XML written or spliced into parts
//! - [`template`]: the built-in default presentation
//!
//! # Example
//!
//! ```rust,no_run
//! use deckgen::ooxml::pptx::Package;
//!
//! let pkg = Package::open("donor.pptx")?;
//! for layout in pkg.slide_layouts()? {
//!     println!("{} ({} placeholders)", layout.name, layout.placeholders.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod package;
pub mod parts;
pub mod shapes;
pub mod template;
pub mod writer;

pub use package::{Package, Slide, SlideLayout};
pub use shapes::{Paragraph, Placeholder, TextFrame};
