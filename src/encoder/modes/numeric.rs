//! Numeric mode encoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::encoder::bitstream::BitStream;

/// Packs decimal digits
pub struct NumericEncoder;

impl NumericEncoder {
    /// Pack ASCII digits into `stream`
    pub fn encode(digits: &[u8], stream: &mut BitStream) {
        for group in digits.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            let bits = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            stream.append_bits(value, bits);
        }
    }
}
