//! Alphanumeric mode encoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use crate::encoder::bitstream::BitStream;
use crate::models::alphanumeric_value;

/// Packs characters from the 45-symbol set
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Pack characters of the 45-symbol alphabet into `stream`
    pub fn encode(text: &[u8], stream: &mut BitStream) {
        for pair in text.chunks(2) {
            let codes: Vec<u32> = pair
                .iter()
                .map(|&c| alphanumeric_value(c).unwrap_or(0) as u32)
                .collect();
            match codes.as_slice() {
                [a, b] => stream.append_bits(a * 45 + b, 11),
                [a] => stream.append_bits(*a, 6),
                _ => {}
            }
        }
    }
}
