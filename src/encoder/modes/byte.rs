//! Byte mode encoder (Mode 0100) for 8-bit data

use crate::encoder::bitstream::BitStream;

/// Packs raw bytes
pub struct ByteEncoder;

impl ByteEncoder {
    /// Append each byte as 8 bits
    pub fn encode(bytes: &[u8], stream: &mut BitStream) {
        for &byte in bytes {
            stream.append_bits(byte as u32, 8);
        }
    }
}
