#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! ### Container Layout
//!
//! Little-endian throughout:
//!
//! - `FORM` magic, declared file size (`u32`), `AUDO` magic, track count (`u32`)
//! - `track_count` stored offsets (`u32`), each 4 less than the absolute
//!   position of its track
//! - the track payloads
//!
//! ### Track Sizes
//!
//! Sizes are not stored. A track ends where the next one starts; the last
//! track is given [`structs::track::SIZE_SENTINEL`] and is read until the end
//! of the stream.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use audiogroup::process::read::Reader;
//!
//! let mut reader = Reader::new(File::open("audiogroup1.dat")?)?;
//! println!("{} tracks", reader.len());
//!
//! for track in reader.extract() {
//!     match track {
//!         Ok(track) => {
//!             let name = format!("track-{:03}.{}", track.index, track.extension());
//!             std::fs::write(name, &track.data)?;
//!         }
//!         Err(e) if e.is_recoverable() => eprintln!("{e}"),
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Decoding and extraction.
///
/// 1. **Reading** ([`process::read`]): Header validation, offset table
///    decoding and track size inference.
///
/// 2. **Extraction** ([`process::extract`]): Seeking to each track and reading
///    its bytes.
pub mod process;

/// Data structures of the container format.
///
/// - **Header** ([`structs::header`]): Fixed 16-byte prefix
/// - **Tracks** ([`structs::track`]): Offset and inferred size of each blob
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Error Handling** ([`utils::errors`]): Error types
/// - **Sniffing** ([`utils::sniff`]): File type guessing for extracted blobs
pub mod utils;
