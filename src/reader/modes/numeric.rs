//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::error::ReadError;
use crate::reader::payload::BitReader;

/// Reads decimal digit groups.
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `count` digits from `reader`, appending ASCII to `out`
    pub(crate) fn decode(
        reader: &mut BitReader<'_>,
        count: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), ReadError> {
        let mut remaining = count;
        while remaining > 0 {
            let group = remaining.min(3);
            let (bits, limit) = match group {
                3 => (10, 1000),
                2 => (7, 100),
                _ => (4, 10),
            };
            let value = reader.read_bits(bits)?;
            if value >= limit {
                return Err(ReadError::MalformedPayload("numeric group out of range"));
            }
            let digits = format!("{value:0group$}");
            out.extend_from_slice(digits.as_bytes());
            remaining -= group;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(value: u32, len: usize) -> Vec<bool> {
        (0..len).rev().map(|i| (value >> i) & 1 == 1).collect()
    }

    #[test]
    fn test_numeric_decode() {
        let mut stream = bits(12, 10);
        stream.extend(bits(345, 10));
        stream.extend(bits(67, 7));
        let mut reader = BitReader::new(&stream);
        let mut out = Vec::new();
        NumericDecoder::decode(&mut reader, 8, &mut out).unwrap();
        assert_eq!(out, b"01234567");
    }

    #[test]
    fn test_out_of_range_group() {
        let stream = bits(1017, 10);
        let mut reader = BitReader::new(&stream);
        assert!(NumericDecoder::decode(&mut reader, 3, &mut Vec::new()).is_err());
    }
}
