//! Slide content: the records a deck is built from and the providers that
//! produce them.

pub mod provider;
pub mod record;

pub use provider::{ContentProvider, JsonContentProvider, StaticContentProvider, parse_slide_records};
pub use record::{Points, SlideRecord};
