//! Blob classification by leading magic bytes.

use std::fmt::Display;

pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";

/// Guessed container type of an extracted track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileKind {
    /// RIFF/WAVE data.
    Wav,
    /// Anything not recognized. Use `file` or `ffprobe` to find out more.
    #[default]
    Unknown,
}

impl FileKind {
    /// Classifies a blob by its first four bytes.
    ///
    /// ```
    /// use audiogroup::utils::sniff::FileKind;
    ///
    /// assert_eq!(FileKind::sniff(b"RIFF\x24\x00\x00\x00WAVE"), FileKind::Wav);
    /// assert_eq!(FileKind::sniff(b"OggS"), FileKind::Unknown);
    /// ```
    pub fn sniff(data: &[u8]) -> Self {
        match data.get(..4) {
            Some(magic) if magic == RIFF_MAGIC => FileKind::Wav,
            _ => FileKind::Unknown,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Wav => "wav",
            FileKind::Unknown => "dat",
        }
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Wav => write!(f, "RIFF/WAVE"),
            FileKind::Unknown => write!(f, "Unknown"),
        }
    }
}
