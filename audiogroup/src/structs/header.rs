use std::io;

use bitstream_io::{ByteRead, ByteReader, LittleEndian};

use crate::utils::errors::{ContainerError, FormatError, MagicField};

pub const FORM_MAGIC: &[u8; 4] = b"FORM";
pub const AUDO_MAGIC: &[u8; 4] = b"AUDO";

/// Fixed-size prefix of every container.
///
/// | bytes | field        |
/// |-------|--------------|
/// | 0–3   | `FORM`       |
/// | 4–7   | file size    |
/// | 8–11  | `AUDO`       |
/// | 12–15 | track count  |
///
/// All integers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub magic: [u8; 4],
    /// Declared size. Never checked against the real file length.
    pub file_size: u32,
    pub sub_magic: [u8; 4],
    pub track_count: u32,
}

impl RawHeader {
    pub const SIZE: usize = 16;

    /// Reads the 16 header bytes without validating them.
    pub fn read<R: io::Read>(
        reader: &mut ByteReader<R, LittleEndian>,
    ) -> Result<Self, ContainerError> {
        Self::read_fields(reader).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                ContainerError::from(FormatError::TruncatedHeader)
            } else {
                ContainerError::from(e)
            }
        })
    }

    fn read_fields<R: io::Read>(reader: &mut ByteReader<R, LittleEndian>) -> io::Result<Self> {
        Ok(Self {
            magic: reader.read::<[u8; 4]>()?,
            file_size: reader.read::<u32>()?,
            sub_magic: reader.read::<[u8; 4]>()?,
            track_count: reader.read::<u32>()?,
        })
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        if &self.magic != FORM_MAGIC {
            return Err(FormatError::InvalidMagic {
                field: MagicField::Header,
                found: self.magic,
            });
        }

        if &self.sub_magic != AUDO_MAGIC {
            return Err(FormatError::InvalidMagic {
                field: MagicField::SubHeader,
                found: self.sub_magic,
            });
        }

        Ok(())
    }

    /// Total length of header plus offset table.
    pub fn directory_len(&self) -> u64 {
        Self::SIZE as u64 + 4 * self.track_count as u64
    }
}
