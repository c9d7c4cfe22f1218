//! Byte mode decoder (Mode 0100)

use crate::error::ReadError;
use crate::reader::payload::BitReader;

/// Reads raw 8-bit bytes.
pub struct ByteDecoder;

impl ByteDecoder {
    pub(crate) fn decode(
        reader: &mut BitReader<'_>,
        count: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), ReadError> {
        out.reserve(count);
        for _ in 0..count {
            out.push(reader.read_bits(8)? as u8);
        }
        Ok(())
    }
}
