//! Alphanumeric mode decoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use crate::error::ReadError;
use crate::models::ALPHANUMERIC_TABLE;
use crate::reader::payload::BitReader;

/// Reads 45-symbol alphanumeric groups.
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub(crate) fn decode(
        reader: &mut BitReader<'_>,
        count: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), ReadError> {
        for _ in 0..count / 2 {
            let value = reader.read_bits(11)? as usize;
            out.push(symbol(value / 45)?);
            out.push(symbol(value % 45)?);
        }
        if count % 2 == 1 {
            let value = reader.read_bits(6)? as usize;
            out.push(symbol(value)?);
        }
        Ok(())
    }
}

fn symbol(code: usize) -> Result<u8, ReadError> {
    ALPHANUMERIC_TABLE
        .get(code)
        .copied()
        .ok_or(ReadError::MalformedPayload("alphanumeric code out of range"))
}
