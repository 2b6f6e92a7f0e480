//! Writers for the PresentationML a deck assembly produces or edits.

pub mod pres;
pub mod shape;
pub mod slide;

pub use pres::{strip_section_refs, write_slide_id_list};
pub use shape::PlaceholderShape;
pub use slide::{NewSlide, replace_text_body};
