//! Payload decoders for the data modes the encoder produces
//!
//! - Numeric: groups of three digits in 10 bits
//! - Alphanumeric: pairs of characters in 11 bits
//! - Byte: raw 8-bit values

pub mod alphanumeric;
pub mod byte;
pub mod numeric;
