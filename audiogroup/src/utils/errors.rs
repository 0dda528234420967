use std::io;

#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Invalid {field}: {found:?} ({})", String::from_utf8_lossy(&.found[..]))]
    InvalidMagic {
        field: MagicField,
        found: [u8; 4],
    },

    /// The source ended before the 16 header bytes.
    ///
    /// Reported instead of [`FormatError::TruncatedOffsetTable`] because the
    /// track count is not known yet.
    #[error("Container ended inside the 16-byte header")]
    TruncatedHeader,

    #[error("Offset table truncated: expected {expected} entries, found {found}")]
    TruncatedOffsetTable { expected: u32, found: u32 },

    #[error("Offset of track {index} overflows: raw offset {raw:#010X}")]
    OffsetOverflow { index: usize, raw: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicField {
    Header,
    SubHeader,
}

impl std::fmt::Display for MagicField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagicField::Header => write!(f, "header"),
            MagicField::SubHeader => write!(f, "sub-header"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContainerError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("I/O error while reading container: {0}")]
    Io(#[from] io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Skipping track {index} (size 0) at {offset:08}")]
    EmptyTrack { index: usize, offset: u64 },

    #[error("Skipping track {index} ({len} bytes, not > 4) at {offset:08}")]
    TooShort { index: usize, offset: u64, len: usize },

    #[error("I/O error on track {index}: {source}")]
    Io {
        index: usize,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    /// Skips are reported and extraction moves on; I/O failures end it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ExtractError::Io { .. })
    }

    pub fn index(&self) -> usize {
        match self {
            ExtractError::EmptyTrack { index, .. }
            | ExtractError::TooShort { index, .. }
            | ExtractError::Io { index, .. } => *index,
        }
    }
}
