/// Container decoding.
///
/// Provides the [`Reader`](read::Reader) that validates the header, decodes the
/// offset table and infers a [`TrackDescriptor`](crate::structs::track::TrackDescriptor)
/// for every embedded track.
pub mod read;

/// Track extraction.
///
/// Provides the [`Extractor`](extract::Extractor) that seeks to each track and
/// reads its bytes into an [`ExtractedTrack`](extract::ExtractedTrack).
pub mod extract;

/// A two-track container: a 16-byte RIFF blob at offset 24 followed by an
/// 8-byte Ogg blob at offset 40 that runs to the end of the data.
pub const EXAMPLE_DATA: &[u8] = &[
    0x46, 0x4F, 0x52, 0x4D, 0x28, 0x00, 0x00, 0x00, 0x41, 0x55, 0x44, 0x4F, 0x02, 0x00, 0x00, 0x00,
    0x14, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00, 0x00, 0x52, 0x49, 0x46, 0x46, 0x08, 0x00, 0x00, 0x00,
    0x57, 0x41, 0x56, 0x45, 0x64, 0x61, 0x74, 0x61, 0x4F, 0x67, 0x67, 0x53, 0x00, 0x02, 0x00, 0x00,
];
