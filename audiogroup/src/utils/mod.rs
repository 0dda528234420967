//! Utility functions and supporting infrastructure.
//!
//! Provides error types and blob classification shared by the reader and the
//! extractor.

pub mod errors;
pub mod sniff;
