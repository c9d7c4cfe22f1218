use super::{Mode, Version};

/// Run of input bytes encoded in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    data: Vec<u8>,
    char_count: usize,
}

impl Segment {
    /// Build a segment; the caller guarantees every byte is valid for `mode`
    pub(crate) fn new(mode: Mode, data: Vec<u8>) -> Self {
        debug_assert!(data.iter().all(|&b| mode.accepts(b)));
        let char_count = data.len();
        Self {
            mode,
            data,
            char_count,
        }
    }

    /// Encoding mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Raw bytes of the segment
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of characters (equals byte count for all supported modes)
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Exact encoded length at `version`, or `None` if the character count
    /// overflows the count indicator
    pub fn bit_len(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits + self.mode.payload_bits(self.char_count))
    }
}

/// Total encoded length of `segments` at `version`
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, seg| Some(acc + seg.bit_len(version)?))
}
