//! Data structures of the audiogroup container.

pub mod header;
pub mod track;
