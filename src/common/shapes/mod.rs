//! Common shape types and enumerations.

pub mod types;

pub use types::PlaceholderType;
