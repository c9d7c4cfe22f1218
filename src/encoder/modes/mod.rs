//! Payload packers for the supported data modes:
//! - Numeric: 3 digits per 10 bits
//! - Alphanumeric: 2 characters per 11 bits
//! - Byte: 8 bits per byte

pub mod alphanumeric;
pub mod byte;
pub mod numeric;
