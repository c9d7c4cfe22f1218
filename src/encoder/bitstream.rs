//! Bit stream assembly: segment headers, payload packing, terminator and padding

use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, numeric::NumericEncoder,
};
use crate::encoder::tables::SymbolSpec;
use crate::error::EncodingError;
use crate::models::{Mode, Segment};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Append-only sequence of bits, MSB first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    /// Empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stream with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 31 && value >> count == 0);
        for i in (0..count).rev() {
            self.bits.push(((value >> i) & 1) != 0);
        }
    }

    /// Bits written so far
    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn into_codewords(self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Serialize `segments` into exactly `spec.data_codewords` codewords
pub fn encode_segments(segments: &[Segment], spec: &SymbolSpec) -> Result<Vec<u8>, EncodingError> {
    let capacity = spec.data_capacity_bits();
    let mut stream = BitStream::with_capacity(capacity);

    for segment in segments {
        let count_bits = segment.mode().char_count_bits(spec.version);
        stream.append_bits(segment.mode().indicator(), 4);
        stream.append_bits(segment.char_count() as u32, count_bits);
        match segment.mode() {
            Mode::Numeric => NumericEncoder::encode(segment.data(), &mut stream),
            Mode::Alphanumeric => AlphanumericEncoder::encode(segment.data(), &mut stream),
            Mode::Byte => ByteEncoder::encode(segment.data(), &mut stream),
        }
    }

    if stream.len() > capacity {
        return Err(EncodingError::BitStreamOverflow {
            bits: stream.len(),
            capacity,
        }
        .logged());
    }

    // Terminator, then zero bits up to the byte boundary
    let terminator = (capacity - stream.len()).min(4);
    stream.append_bits(0, terminator);
    let partial = stream.len() % 8;
    if partial != 0 {
        stream.append_bits(0, 8 - partial);
    }

    let mut codewords = stream.into_codewords();
    for pad in PAD_BYTES.iter().cycle() {
        if codewords.len() >= spec.data_codewords {
            break;
        }
        codewords.push(*pad);
    }

    tracing::trace!(
        codewords = codewords.len(),
        capacity = spec.data_codewords,
        "bit stream finalized"
    );
    Ok(codewords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ECLevel, Version};

    #[test]
    fn test_append_and_pack() {
        let mut stream = BitStream::new();
        stream.append_bits(0b0010, 4);
        stream.append_bits(0b1011, 4);
        stream.append_bits(0b1, 1);
        assert_eq!(stream.len(), 9);
        assert_eq!(stream.into_codewords(), vec![0x2B, 0x80]);
    }

    #[test]
    fn test_hello_world_1q_data_codewords() {
        let spec = SymbolSpec::new(Version::new(1).unwrap(), ECLevel::Q).unwrap();
        let segments = vec![Segment::new(Mode::Alphanumeric, b"HELLO WORLD".to_vec())];
        let codewords = encode_segments(&segments, &spec).unwrap();
        assert_eq!(
            codewords,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236]
        );
    }

    #[test]
    fn test_terminator_truncated_at_capacity() {
        // 1-H holds 72 bits; 4 + 8 + 7*8 = 68 bits leaves exactly 4 for the terminator
        let spec = SymbolSpec::new(Version::new(1).unwrap(), ECLevel::H).unwrap();
        let segments = vec![Segment::new(Mode::Byte, b"abcdefg".to_vec())];
        let codewords = encode_segments(&segments, &spec).unwrap();
        assert_eq!(codewords.len(), 9);
        assert_eq!(codewords[8] & 0x0F, 0);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let spec = SymbolSpec::new(Version::new(1).unwrap(), ECLevel::H).unwrap();
        let segments = vec![Segment::new(Mode::Byte, b"abcdefgh".to_vec())];
        let err = encode_segments(&segments, &spec).unwrap_err();
        assert!(matches!(err, EncodingError::BitStreamOverflow { .. }));
    }
}
