//! Format and version information recovery with nearest-codeword correction

use crate::encoder::format::{
    format_bits, format_positions_primary, format_positions_secondary, version_bits,
    version_positions,
};
use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};

/// Largest Hamming distance still accepted as a match
const MAX_DISTANCE: u32 = 3;

/// EC level and mask read from a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask
    pub mask: MaskPattern,
}

impl FormatInfo {
    /// Decode a raw 15-bit word to the nearest valid format word
    pub fn decode(raw: u16) -> Option<Self> {
        let mut best: Option<(u32, FormatInfo)> = None;
        for ec_level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let distance = (format_bits(ec_level, mask) ^ raw).count_ones();
                if distance <= MAX_DISTANCE && best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, FormatInfo { ec_level, mask }));
                }
            }
        }
        best.map(|(_, info)| info)
    }

    /// Try the copy around the top-left finder, then the split copy
    pub fn extract(matrix: &ModuleMatrix) -> Option<Self> {
        let size = matrix.size();
        let primary = read_word(matrix, 15, format_positions_primary);
        let secondary = read_word(matrix, 15, |i| format_positions_secondary(i, size));
        Self::decode(primary as u16).or_else(|| Self::decode(secondary as u16))
    }
}

/// Decode a raw 18-bit version word to the nearest valid version
pub fn decode_version(raw: u32) -> Option<Version> {
    (7..=40)
        .filter_map(Version::new)
        .map(|v| ((version_bits(v) ^ raw).count_ones(), v))
        .filter(|&(distance, _)| distance <= MAX_DISTANCE)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, v)| v)
}

/// Version from either version block (versions 7 and up)
pub fn extract_version(matrix: &ModuleMatrix) -> Option<Version> {
    let size = matrix.size();
    let top_right = read_word(matrix, 18, |i| version_positions(i, size)[0]);
    let bottom_left = read_word(matrix, 18, |i| version_positions(i, size)[1]);
    decode_version(top_right).or_else(|| decode_version(bottom_left))
}

fn read_word(matrix: &ModuleMatrix, len: usize, position: impl Fn(usize) -> (usize, usize)) -> u32 {
    (0..len).fold(0u32, |word, i| {
        let (x, y) = position(i);
        word | ((matrix.is_dark(x, y) as u32) << i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_exact_format() {
        for ec_level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let info = FormatInfo::decode(format_bits(ec_level, mask)).unwrap();
                assert_eq!(info, FormatInfo { ec_level, mask });
            }
        }
    }

    #[test]
    fn test_decode_corrected_format() {
        let word = format_bits(ECLevel::Q, MaskPattern::Pattern6) ^ 0b100_0000_0100_0001;
        let info = FormatInfo::decode(word).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask, MaskPattern::Pattern6);
    }

    #[test]
    fn test_decode_version() {
        let v = Version::new(21).unwrap();
        assert_eq!(decode_version(version_bits(v)), Some(v));
        assert_eq!(decode_version(version_bits(v) ^ 0b101), Some(v));
        assert_eq!(decode_version(0), None);
    }
}
