//! Common types and utilities shared across the package and presentation layers.

pub mod error;
pub mod shapes;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use shapes::PlaceholderType;
