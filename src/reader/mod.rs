//! Symbol reader for clean module matrices.
//!
//! Reverses the encoder: version and format information, unmasking,
//! zigzag extraction, de-interleaving, Reed-Solomon correction and
//! segment decoding. Works on a [`ModuleMatrix`] directly, with no image
//! sampling involved.

/// Format and version information decoding
pub mod format;
/// Per-mode payload decoders
pub mod modes;
/// Block de-interleaving and segment decoding
pub mod payload;
/// Reed-Solomon error correction
pub mod reed_solomon;

use crate::encoder::function_patterns::function_matrix;
use crate::encoder::placement::data_module_order;
use crate::encoder::tables::SymbolSpec;
use crate::error::ReadError;
use crate::models::{ECLevel, MaskPattern, Mode, ModuleMatrix, Version};
use format::{FormatInfo, extract_version};
use payload::{bits_to_codewords, decode_payload, deinterleave_and_correct};

/// Contents and metadata recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Version inferred from the matrix side
    pub version: Version,
    /// EC level from format information
    pub ec_level: ECLevel,
    /// Mask from format information
    pub mask: MaskPattern,
    /// Decoded bytes, all segments concatenated
    pub data: Vec<u8>,
    /// Segment modes in order
    pub modes: Vec<Mode>,
    /// Codewords repaired by error correction
    pub corrected_codewords: usize,
}

/// Decode a module matrix back into its data bytes
pub fn read(matrix: &ModuleMatrix) -> Result<DecodedSymbol, ReadError> {
    let size = matrix.size();
    let version = Version::from_size(size).ok_or(ReadError::InvalidDimension(size))?;

    if version.number() >= 7 && extract_version(matrix) != Some(version) {
        return Err(ReadError::VersionInfo);
    }

    let format = FormatInfo::extract(matrix).ok_or(ReadError::FormatInfo)?;
    let spec = SymbolSpec::new(version, format.ec_level)
        .map_err(|_| ReadError::MalformedPayload("no block table for symbol"))?;

    // Data module layout depends only on the version
    let layout = function_matrix(version);
    let bits: Vec<bool> = data_module_order(&layout)
        .into_iter()
        .map(|(x, y)| matrix.is_dark(x, y) ^ format.mask.is_masked(y, x))
        .collect();
    let codewords = bits_to_codewords(&bits);

    let (data_codewords, corrected) = deinterleave_and_correct(&codewords, &spec)?;
    let (data, modes) = decode_payload(&data_codewords, version)?;

    tracing::debug!(
        version = version.number(),
        ec_level = ?format.ec_level,
        mask = format.mask.id(),
        corrected,
        bytes = data.len(),
        "symbol read"
    );

    Ok(DecodedSymbol {
        version,
        ec_level: format.ec_level,
        mask: format.mask,
        data,
        modes,
        corrected_codewords: corrected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeOptions, encode_with_options};

    fn encode(data: &[u8], level: ECLevel, min_version: u8) -> ModuleMatrix {
        let opts = EncodeOptions::new(level).min_version(min_version).sequential();
        encode_with_options(data, &opts).unwrap().modules
    }

    #[test]
    fn test_read_hello_world() {
        let matrix = encode(b"HELLO WORLD", ECLevel::Q, 1);
        let decoded = read(&matrix).unwrap();
        assert_eq!(decoded.data, b"HELLO WORLD");
        assert_eq!(decoded.version.number(), 1);
        assert_eq!(decoded.ec_level, ECLevel::Q);
        assert_eq!(decoded.modes, vec![Mode::Alphanumeric]);
        assert_eq!(decoded.corrected_codewords, 0);
    }

    #[test]
    fn test_read_corrects_damaged_modules() {
        let mut matrix = encode(b"https://example.com/read?id=42", ECLevel::H, 7);
        let order = data_module_order(&function_matrix(matrix.version()));
        // Scatter a few flipped modules across different codewords
        for &index in &[0usize, 40, 400, 800] {
            let (x, y) = order[index];
            matrix.toggle(x, y);
        }
        let decoded = read(&matrix).unwrap();
        assert_eq!(decoded.data, b"https://example.com/read?id=42");
        assert!(decoded.corrected_codewords >= 1);
    }

    #[test]
    fn test_damaged_format_copy_is_recovered() {
        let mut matrix = encode(b"12345678", ECLevel::M, 1);
        // An all-light word is at least 5 bits from every format word
        for i in 0..15 {
            let (x, y) = crate::encoder::format::format_positions_primary(i);
            matrix.set_function(x, y, false);
        }
        assert!(FormatInfo::decode(0).is_none());
        let decoded = read(&matrix).unwrap();
        assert_eq!(decoded.data, b"12345678");
    }

    #[test]
    fn test_heavy_damage_is_uncorrectable() {
        let mut matrix = encode(b"uncorrectable", ECLevel::L, 1);
        let order = data_module_order(&function_matrix(matrix.version()));
        for &(x, y) in order.iter().take(8 * 12) {
            matrix.toggle(x, y);
        }
        assert!(matches!(
            read(&matrix),
            Err(ReadError::Uncorrectable { .. }) | Err(ReadError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_blank_matrix_has_no_format() {
        let matrix = ModuleMatrix::new(Version::new(1).unwrap());
        // A blank matrix has a valid size but no format information
        assert_eq!(read(&matrix), Err(ReadError::FormatInfo));
    }
}
