//! Open Packaging Conventions (OPC) implementation.
//!
//! Parts, relationships and content types of a ZIP-based Office Open XML
//! package, read into memory, edited, and written back out.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
