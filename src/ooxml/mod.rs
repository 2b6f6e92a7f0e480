//! Office Open XML (OOXML) implementation.
//!
//! Two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, content types, parts,
//!    relationships)
//! 2. **PresentationML** (`pptx`): presentations, layouts, slides and
//!    placeholders on top of the OPC layer
//!
//! # Example
//!
//! ```rust,no_run
//! use deckgen::ooxml::pptx::Package;
//!
//! let pkg = Package::open("presentation.pptx")?;
//! for slide in pkg.slides()? {
//!     println!("{:?}", slide.title());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
