/// Size given to tracks whose length cannot be inferred.
///
/// The extractor reads such a track until the end of the stream.
pub const SIZE_SENTINEL: u32 = u32::MAX;

/// Location of one embedded blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Absolute byte offset of the first byte of the track.
    pub offset: u64,
    /// Inferred length in bytes, or [`SIZE_SENTINEL`].
    pub size: u32,
}

impl TrackDescriptor {
    pub fn is_unbounded(&self) -> bool {
        self.size == SIZE_SENTINEL
    }

    /// Maximum number of bytes to read for this track.
    pub fn read_limit(&self) -> u64 {
        if self.is_unbounded() {
            u64::MAX
        } else {
            self.size as u64
        }
    }
}

#[test]
fn sentinel_reads_to_end() {
    let last = TrackDescriptor {
        offset: 20,
        size: SIZE_SENTINEL,
    };
    assert!(last.is_unbounded());
    assert_eq!(last.read_limit(), u64::MAX);

    let inner = TrackDescriptor {
        offset: 4,
        size: 16,
    };
    assert!(!inner.is_unbounded());
    assert_eq!(inner.read_limit(), 16);
}
