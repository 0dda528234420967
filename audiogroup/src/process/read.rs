use std::io::{Read, Seek};

use bitstream_io::{ByteRead, ByteReader, LittleEndian};
use log::{debug, trace, warn};

use crate::process::extract::Extractor;
use crate::structs::header::RawHeader;
use crate::structs::track::{SIZE_SENTINEL, TrackDescriptor};
use crate::utils::errors::{ContainerError, FormatError};

/// Added to every stored offset to get the absolute file position.
///
/// Holds for the `FORM`/`AUDO` layout read here; other container versions
/// may frame their offsets differently.
pub const OFFSET_FRAMING: u32 = 4;

/// Upper bound on the offset table preallocation, so a corrupt track count
/// cannot request a huge buffer before the table is actually read.
const MAX_PREALLOC: u32 = 4096;

/// Decoded container directory.
///
/// Construction reads the header and the offset table from the current
/// position of the source (normally its start) and infers one
/// [`TrackDescriptor`] per table entry. Nothing changes afterwards.
///
/// The source may be owned or borrowed; `&mut File` works as well as `File`.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use audiogroup::process::{EXAMPLE_DATA, read::Reader};
/// use audiogroup::structs::track::SIZE_SENTINEL;
///
/// let reader = Reader::new(Cursor::new(EXAMPLE_DATA))?;
///
/// let tracks = reader.tracks();
/// assert_eq!(tracks.len(), 2);
/// assert_eq!((tracks[0].offset, tracks[0].size), (24, 16));
/// assert_eq!((tracks[1].offset, tracks[1].size), (40, SIZE_SENTINEL));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    source: R,
    header: RawHeader,
    tracks: Vec<TrackDescriptor>,
}

impl<R: Read + Seek> Reader<R> {
    /// Decodes the directory of `source`.
    ///
    /// Fails on the first malformed or unreadable field; no partially decoded
    /// reader is ever returned.
    pub fn new(mut source: R) -> Result<Self, ContainerError> {
        let (header, offsets) = decode_directory(&mut source)?;
        let tracks = infer_tracks(&offsets);

        debug!(
            "Decoded audiogroup directory: {} tracks, declared file size {} bytes",
            tracks.len(),
            header.file_size
        );

        Ok(Self {
            source,
            header,
            tracks,
        })
    }

    /// Iterates over the tracks, reading each one from the source.
    pub fn extract(&mut self) -> Extractor<'_, R> {
        Extractor::new(&mut self.source, &self.tracks)
    }
}

impl<R> Reader<R> {
    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn header(&self) -> &RawHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Gives access to the source, e.g. to seek to a track.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Reads and validates the header, then the offset table.
///
/// Consumes exactly `16 + 4 * track_count` bytes on success and returns the
/// absolute track offsets in table order.
pub fn decode_directory<R: Read>(source: R) -> Result<(RawHeader, Vec<u64>), ContainerError> {
    let mut reader = ByteReader::endian(source, LittleEndian);

    let header = RawHeader::read(&mut reader)?;
    header.validate()?;

    let mut offsets = Vec::with_capacity(header.track_count.min(MAX_PREALLOC) as usize);

    for index in 0..header.track_count {
        let raw = match reader.read::<u32>() {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(FormatError::TruncatedOffsetTable {
                    expected: header.track_count,
                    found: index,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        let offset = raw
            .checked_add(OFFSET_FRAMING)
            .ok_or(FormatError::OffsetOverflow {
                index: index as usize,
                raw,
            })?;

        trace!("Track {index}: raw offset {raw:#010X}, absolute {offset}");
        offsets.push(offset as u64);
    }

    Ok((header, offsets))
}

/// Turns absolute offsets into descriptors.
///
/// Each size is the gap to the next offset. A gap that is negative or does
/// not fit in 32 bits saturates to [`SIZE_SENTINEL`]. The last track always
/// gets the sentinel since nothing follows it.
pub fn infer_tracks(offsets: &[u64]) -> Vec<TrackDescriptor> {
    offsets
        .iter()
        .enumerate()
        .map(|(index, &offset)| {
            let size = match offsets.get(index + 1) {
                Some(&next) => gap_size(index, offset, next),
                None => SIZE_SENTINEL,
            };

            TrackDescriptor { offset, size }
        })
        .collect()
}

fn gap_size(index: usize, offset: u64, next: u64) -> u32 {
    match next.checked_sub(offset).map(u32::try_from) {
        Some(Ok(size)) => size,
        _ => {
            warn!(
                "Track {index}: next offset {next} does not follow {offset}, size clamped to {SIZE_SENTINEL}"
            );
            SIZE_SENTINEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::EXAMPLE_DATA;
    use std::io::Cursor;

    fn container(track_count: u32, raw_offsets: &[u32]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"FORM");
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(b"AUDO");
        data.extend_from_slice(&track_count.to_le_bytes());
        for raw in raw_offsets {
            data.extend_from_slice(&raw.to_le_bytes());
        }
        data
    }

    fn format_error(result: Result<Reader<Cursor<Vec<u8>>>, ContainerError>) -> FormatError {
        match result {
            Err(ContainerError::Format(e)) => e,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn two_tracks() -> anyhow::Result<()> {
        let reader = Reader::new(Cursor::new(container(2, &[0x0000_0000, 0x0000_0010])))?;

        assert_eq!(
            reader.tracks(),
            &[
                TrackDescriptor {
                    offset: 4,
                    size: 16
                },
                TrackDescriptor {
                    offset: 20,
                    size: SIZE_SENTINEL
                },
            ]
        );
        assert_eq!(reader.header().track_count, 2);
        Ok(())
    }

    #[test]
    fn offsets_are_framed_and_sizes_are_gaps() -> anyhow::Result<()> {
        let raw = [0x14, 0x40, 0x1000, 0x1001, 0xABCDE];
        let reader = Reader::new(Cursor::new(container(raw.len() as u32, &raw)))?;
        let tracks = reader.tracks();

        assert_eq!(tracks.len(), raw.len());
        for (track, raw) in tracks.iter().zip(raw) {
            assert_eq!(track.offset, raw as u64 + 4);
        }
        for pair in tracks.windows(2) {
            assert_eq!(pair[0].size as u64, pair[1].offset - pair[0].offset);
        }
        assert_eq!(tracks[raw.len() - 1].size, SIZE_SENTINEL);
        Ok(())
    }

    #[test]
    fn zero_tracks() -> anyhow::Result<()> {
        let reader = Reader::new(Cursor::new(container(0, &[])))?;
        assert!(reader.is_empty());
        assert_eq!(reader.len(), 0);
        Ok(())
    }

    #[test]
    fn file_size_field_is_ignored() -> anyhow::Result<()> {
        let mut data = container(1, &[0x20]);
        data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());

        let reader = Reader::new(Cursor::new(data))?;
        assert_eq!(reader.header().file_size, u32::MAX);
        assert_eq!(reader.len(), 1);
        Ok(())
    }

    #[test]
    fn invalid_magic() {
        let mut data = container(1, &[0]);
        data[0] = b'X';
        assert!(matches!(
            format_error(Reader::new(Cursor::new(data))),
            FormatError::InvalidMagic { .. }
        ));

        let mut data = container(1, &[0]);
        data[11] = b'X';
        assert!(matches!(
            format_error(Reader::new(Cursor::new(data))),
            FormatError::InvalidMagic { .. }
        ));
    }

    #[test]
    fn truncated_offset_table() {
        let mut data = container(3, &[0, 0x10, 0x20]);
        data.truncate(data.len() - 2);

        assert!(matches!(
            format_error(Reader::new(Cursor::new(data))),
            FormatError::TruncatedOffsetTable {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn offset_overflow() {
        let data = container(2, &[0x10, u32::MAX - 2]);

        assert!(matches!(
            format_error(Reader::new(Cursor::new(data))),
            FormatError::OffsetOverflow {
                index: 1,
                raw: 0xFFFF_FFFD
            }
        ));
    }

    #[test]
    fn largest_offset_without_overflow() -> anyhow::Result<()> {
        let reader = Reader::new(Cursor::new(container(1, &[u32::MAX - 4])))?;
        assert_eq!(reader.tracks()[0].offset, u32::MAX as u64);
        Ok(())
    }

    #[test]
    fn decreasing_offsets_saturate() {
        let tracks = infer_tracks(&[100, 40, 60]);

        assert_eq!(tracks[0].size, SIZE_SENTINEL);
        assert_eq!(tracks[1].size, 20);
        assert_eq!(tracks[2].size, SIZE_SENTINEL);
    }

    #[test]
    fn equal_offsets_give_empty_track() {
        let tracks = infer_tracks(&[8, 8, 12]);
        assert_eq!(tracks[0].size, 0);
        assert_eq!(tracks[1].size, 4);
    }

    #[test]
    fn oversized_gap_saturates() {
        let tracks = infer_tracks(&[0, u32::MAX as u64 + 10]);
        assert_eq!(tracks[0].size, SIZE_SENTINEL);
    }

    #[test]
    fn no_offsets_no_tracks() {
        assert!(infer_tracks(&[]).is_empty());
    }

    #[test]
    fn directory_consumes_exact_length() -> anyhow::Result<()> {
        let mut cursor = Cursor::new(EXAMPLE_DATA);
        let (header, offsets) = decode_directory(&mut cursor)?;

        assert_eq!(cursor.position(), header.directory_len());
        assert_eq!(offsets, vec![24, 40]);
        Ok(())
    }

    struct BadSector;

    impl Read for BadSector {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("bad sector"))
        }
    }

    #[test]
    fn read_error_inside_offset_table() {
        let source = Cursor::new(container(2, &[0])).chain(BadSector);

        match decode_directory(source) {
            Err(ContainerError::Io(e)) => assert_eq!(e.to_string(), "bad sector"),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn source_is_handed_back() -> anyhow::Result<()> {
        let mut reader = Reader::new(Cursor::new(EXAMPLE_DATA))?;
        assert_eq!(reader.get_mut().position(), 24);

        let track = reader.tracks()[1];
        let mut cursor = reader.into_inner();
        cursor.set_position(track.offset);
        assert_eq!(&cursor.get_ref()[cursor.position() as usize..], b"OggS\x00\x02\x00\x00");
        Ok(())
    }

    #[test]
    fn borrowed_source() -> anyhow::Result<()> {
        let mut cursor = Cursor::new(EXAMPLE_DATA);
        let reader = Reader::new(&mut cursor)?;
        assert_eq!(reader.len(), 2);
        drop(reader);

        assert_eq!(cursor.position(), 24);
        Ok(())
    }
}
