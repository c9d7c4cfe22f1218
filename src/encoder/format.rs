//! BCH-protected format and version information

use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u32 = 0x5412;
/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// 15-bit masked format word for `ec_level` and `mask`
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u32) << 3) | mask.id() as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    (((data << 10) | rem) ^ FORMAT_XOR_MASK) as u16
}

/// 18-bit version word (versions 7-40)
pub fn version_bits(version: Version) -> u32 {
    let data = version.number() as u32;
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | rem
}

/// Positions of format bit `i` (0 = LSB) in the first copy, around the top-left finder
pub fn format_positions_primary(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Positions of format bit `i` in the second copy, split across the other finders
pub fn format_positions_secondary(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

/// Positions of version bit `i` in the top-right and bottom-left blocks
pub fn version_positions(i: usize, size: usize) -> [(usize, usize); 2] {
    let a = size - 11 + i % 3;
    let b = i / 3;
    [(a, b), (b, a)]
}

/// Write both format information copies
pub fn write_format_info(matrix: &mut ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = format_bits(ec_level, mask);
    let size = matrix.size();
    for i in 0..15 {
        let dark = (bits >> i) & 1 == 1;
        let (x, y) = format_positions_primary(i);
        matrix.set_function(x, y, dark);
        let (x, y) = format_positions_secondary(i, size);
        matrix.set_function(x, y, dark);
    }
}

/// Write both version information blocks (no-op below version 7)
pub fn write_version_info(matrix: &mut ModuleMatrix) {
    let version = matrix.version();
    if version.number() < 7 {
        return;
    }
    let bits = version_bits(version);
    let size = matrix.size();
    for i in 0..18 {
        let dark = (bits >> i) & 1 == 1;
        for (x, y) in version_positions(i, size) {
            matrix.set_function(x, y, dark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::function_matrix;
    use crate::models::Module;

    #[test]
    fn test_known_format_words() {
        assert_eq!(format_bits(ECLevel::L, MaskPattern::Pattern0), 0b111011111000100);
        assert_eq!(format_bits(ECLevel::M, MaskPattern::Pattern0), 0b101010000010010);
        assert_eq!(format_bits(ECLevel::Q, MaskPattern::Pattern0), 0b011010101011111);
        assert_eq!(format_bits(ECLevel::H, MaskPattern::Pattern0), 0b001011010001001);
        assert_eq!(format_bits(ECLevel::L, MaskPattern::Pattern4), 0b110011000101111);
    }

    #[test]
    fn test_known_version_words() {
        assert_eq!(version_bits(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_bits(Version::new(40).unwrap()), 0x28C69);
    }

    #[test]
    fn test_format_words_are_distinct() {
        let mut words: Vec<u16> = ECLevel::ALL
            .iter()
            .flat_map(|&l| MaskPattern::ALL.iter().map(move |&m| format_bits(l, m)))
            .collect();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), 32);
    }

    #[test]
    fn test_write_fills_reserved_cells() {
        let mut matrix = function_matrix(Version::new(7).unwrap());
        write_format_info(&mut matrix, ECLevel::M, MaskPattern::Pattern3);
        write_version_info(&mut matrix);
        let size = matrix.size();
        for y in 0..size {
            for x in 0..size {
                assert_ne!(matrix.get(x, y), Module::Reserved, "({x}, {y})");
            }
        }
    }
}
