use std::io::{Read, Seek, SeekFrom};

use log::debug;

use crate::structs::track::TrackDescriptor;
use crate::utils::errors::ExtractError;
use crate::utils::sniff::FileKind;

/// Tracks must yield more than this many bytes to be kept.
pub const MIN_TRACK_LEN: usize = 4;

/// Reads tracks out of a container source.
///
/// Yields one item per descriptor, in order. Empty or too short tracks come
/// out as recoverable [`ExtractError`]s so the caller can report them and keep
/// going. The first I/O error is yielded once and ends the iteration.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use audiogroup::process::{EXAMPLE_DATA, read::Reader};
/// use audiogroup::utils::sniff::FileKind;
///
/// let mut reader = Reader::new(Cursor::new(EXAMPLE_DATA))?;
///
/// for track in reader.extract() {
///     match track {
///         Ok(track) => println!("#{} {} bytes ({})", track.index, track.len(), track.kind),
///         Err(e) if e.is_recoverable() => eprintln!("{e}"),
///         Err(e) => return Err(e.into()),
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Extractor<'a, R> {
    source: &'a mut R,
    tracks: &'a [TrackDescriptor],
    next_index: usize,
    failed: bool,
}

/// Bytes of one track together with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTrack {
    pub index: usize,
    pub offset: u64,
    pub kind: FileKind,
    pub data: Vec<u8>,
}

impl ExtractedTrack {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn extension(&self) -> &'static str {
        self.kind.extension()
    }
}

impl AsRef<[u8]> for ExtractedTrack {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<'a, R: Read + Seek> Extractor<'a, R> {
    pub fn new(source: &'a mut R, tracks: &'a [TrackDescriptor]) -> Self {
        Self {
            source,
            tracks,
            next_index: 0,
            failed: false,
        }
    }

    fn extract(
        &mut self,
        index: usize,
        track: &TrackDescriptor,
    ) -> Result<ExtractedTrack, ExtractError> {
        let io_err = |source| ExtractError::Io { index, source };

        self.source
            .seek(SeekFrom::Start(track.offset))
            .map_err(io_err)?;

        if track.size == 0 {
            return Err(ExtractError::EmptyTrack {
                index,
                offset: track.offset,
            });
        }

        let mut data = Vec::new();
        self.source
            .by_ref()
            .take(track.read_limit())
            .read_to_end(&mut data)
            .map_err(io_err)?;

        if data.len() <= MIN_TRACK_LEN {
            return Err(ExtractError::TooShort {
                index,
                offset: track.offset,
                len: data.len(),
            });
        }

        if !track.is_unbounded() && data.len() < track.size as usize {
            debug!(
                "Track {index}: stream ended after {} of {} bytes",
                data.len(),
                track.size
            );
        }

        Ok(ExtractedTrack {
            index,
            offset: track.offset,
            kind: FileKind::sniff(&data),
            data,
        })
    }
}

impl<R: Read + Seek> Iterator for Extractor<'_, R> {
    type Item = Result<ExtractedTrack, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let index = self.next_index;
        let track = *self.tracks.get(index)?;
        self.next_index += 1;

        let result = self.extract(index, &track);
        if matches!(result, Err(ExtractError::Io { .. })) {
            self.failed = true;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.tracks.len() - self.next_index;
        (0, Some(remaining))
    }
}
