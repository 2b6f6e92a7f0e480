//! XML helpers shared by the package and PresentationML layers.

pub mod escape;
pub mod splice;

pub use escape::{escape_run_text, escape_xml, resolve_entity, unescape_xml};
pub use splice::{find_element_spans, path_is, splice};
