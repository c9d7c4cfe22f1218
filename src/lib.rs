//! rust_qrgen - QR code symbol encoder
//!
//! Turns a byte string into a QR Model 2 module matrix: mode segmentation,
//! version selection, Reed-Solomon coding, module placement and mask
//! selection. A reader for clean matrices and a small raster helper are
//! included for verification and output.
//!
//! ```
//! use rust_qrgen::{ECLevel, encode};
//!
//! let matrix = encode(b"HELLO WORLD", ECLevel::Q, 1).unwrap();
//! assert_eq!(matrix.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven defaults
pub mod config;
/// Encoding pipeline stages
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (Version, ECLevel, ModuleMatrix, QrCode, etc.)
pub mod models;
/// Decoding of clean module matrices
pub mod reader;
/// Image, PNG and text output
pub mod render;

pub use config::Segmentation;
pub use encoder::{EncodeOptions, QrEncoder, encode_with_options};
pub use error::{EncodingError, ErrorClass, ReadError, RenderError};
pub use models::{ECLevel, MaskPattern, Mode, Module, ModuleMatrix, QrCode, Segment, Version};
pub use reader::{DecodedSymbol, read};

/// Encode `text` at `ec_level`, using the smallest version not below `min_version`
///
/// # Arguments
/// * `text` - Bytes to encode (ASCII text, UTF-8 or binary)
/// * `ec_level` - Error correction level
/// * `min_version` - Smallest version to consider (1-40)
///
/// # Returns
/// The finished module matrix, or the reason encoding failed
pub fn encode(text: &[u8], ec_level: ECLevel, min_version: u8) -> Result<ModuleMatrix, EncodingError> {
    let options = EncodeOptions::new(ec_level).min_version(min_version);
    encode_with_options(text, &options).map(|code| code.modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_entry_point() {
        let matrix = encode(b"HELLO WORLD", ECLevel::Q, 1).unwrap();
        assert_eq!(matrix.version().number(), 1);
        assert_eq!(read(&matrix).unwrap().data, b"HELLO WORLD");
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(encode(b"", ECLevel::L, 1), Err(EncodingError::EmptyInput));
        assert_eq!(
            encode(b"x", ECLevel::L, 0),
            Err(EncodingError::InvalidVersionRange { min: 0, max: 40 })
        );
    }

    #[test]
    fn test_min_version_is_honored() {
        let matrix = encode(b"1", ECLevel::H, 12).unwrap();
        assert_eq!(matrix.size(), 4 * 12 + 17);
    }
}
