//! Shapes on slides, layouts and masters.
//!
//! Only placeholder shapes are modeled: they are what a layout hands down to
//! the slides created from it.
pub mod placeholder;
pub mod textframe;

pub use placeholder::{Placeholder, parse_placeholders};
pub use textframe::{Paragraph, TextFrame};
