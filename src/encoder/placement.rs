//! Codeword placement into the module matrix following the zigzag pattern

use crate::error::EncodingError;
use crate::models::{Module, ModuleMatrix};

/// Data module coordinates (x, y) in codeword placement order.
///
/// Column pairs are walked right to left, skipping the vertical timing
/// column, alternating upward and downward; within a pair the right column
/// comes first.
pub fn data_module_order(matrix: &ModuleMatrix) -> Vec<(usize, usize)> {
    let dimension = matrix.size();
    let mut order = Vec::with_capacity(matrix.data_modules_count());

    let mut upward = true;
    let mut col = dimension as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        let right = col as usize;
        let left = right - 1;
        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for x in [right, left] {
                if !matrix.is_function(x, row) {
                    order.push((x, row));
                }
            }
        }

        upward = !upward;
        col -= 2;
    }

    order
}

/// Write `codewords` MSB-first along the zigzag; remainder modules become light.
pub fn place_codewords(matrix: &mut ModuleMatrix, codewords: &[u8]) -> Result<(), EncodingError> {
    let order = data_module_order(matrix);
    let bits = codewords.len() * 8;
    let slots = order.len();
    // Remainder bits are always fewer than 8
    if bits > slots || slots - bits >= 8 {
        return Err(EncodingError::LayoutOverflow { bits, slots }.logged());
    }

    for (i, &(x, y)) in order.iter().enumerate() {
        let dark = codewords
            .get(i / 8)
            .is_some_and(|&byte| (byte >> (7 - (i % 8))) & 1 == 1);
        matrix.set(x, y, Module::from_dark(dark));
    }

    tracing::trace!(bits, remainder = slots - bits, "codewords placed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::function_matrix;
    use crate::models::Version;

    #[test]
    fn test_order_starts_bottom_right() {
        let matrix = function_matrix(Version::new(1).unwrap());
        let order = data_module_order(&matrix);
        assert_eq!(order.len(), 208);
        assert_eq!(&order[..4], &[(20, 20), (19, 20), (20, 19), (19, 19)]);
        // Column 6 never carries data
        assert!(order.iter().all(|&(x, _)| x != 6));
    }

    #[test]
    fn test_place_codewords_fills_every_data_module() {
        let mut matrix = function_matrix(Version::new(2).unwrap());
        let codewords = vec![0xA5u8; 44];
        place_codewords(&mut matrix, &codewords).unwrap();

        let order = data_module_order(&matrix);
        // 0xA5 = 1010_0101
        assert!(matrix.is_dark(order[0].0, order[0].1));
        assert!(!matrix.is_dark(order[1].0, order[1].1));
        // 7 remainder bits are light
        for &(x, y) in &order[352..] {
            assert_eq!(matrix.get(x, y), Module::Light);
        }
    }

    #[test]
    fn test_layout_overflow() {
        let mut matrix = function_matrix(Version::new(1).unwrap());
        let err = place_codewords(&mut matrix, &[0u8; 27]).unwrap_err();
        assert_eq!(err, EncodingError::LayoutOverflow { bits: 216, slots: 208 });

        let err = place_codewords(&mut matrix, &[0u8; 25]).unwrap_err();
        assert!(matches!(err, EncodingError::LayoutOverflow { .. }));
    }
}
