//! Unified error types for deckgen.
//!
//! This module provides a single error type that encompasses failures from
//! the OPC layer, the PresentationML layer and the assembly pipeline.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
