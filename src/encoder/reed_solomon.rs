//! Reed-Solomon error correction coding for QR codes
//! QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1

use crate::encoder::tables::SymbolSpec;
use crate::error::EncodingError;

/// GF(256) field operations using log/exp tables
pub struct Gf256;

static LOG_TABLE: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

static EXP_TABLE: [u8; 256] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1,
];

impl Gf256 {
    /// Product of `a` and `b`
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// Divide `a` by non-zero `b`
    pub fn div(a: u8, b: u8) -> u8 {
        assert!(b != 0, "division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    /// `a^n` for any exponent
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// `alpha^n`
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }
}

/// Systematic Reed-Solomon encoder with generator roots alpha^0 .. alpha^(n-1)
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    /// Generator coefficients in descending order, leading 1 omitted
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Encoder producing `num_ecc_codewords` EC codewords per block
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self {
            generator: generator_polynomial(num_ecc_codewords),
        }
    }

    /// Degree of the generator polynomial
    pub fn num_ecc_codewords(&self) -> usize {
        self.generator.len()
    }

    /// Remainder of `data(x) * x^n` divided by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.generator.len();
        let mut remainder = vec![0u8; degree];
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[degree - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(&self.generator) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// Product of (x - alpha^i) for i in 0..degree, descending, leading term dropped
fn generator_polynomial(degree: usize) -> Vec<u8> {
    assert!((1..=255).contains(&degree), "generator degree out of range");
    let mut result = vec![0u8; degree];
    result[degree - 1] = 1;
    let mut root = 1u8;
    for _ in 0..degree {
        // Multiply by (x - root)
        for j in 0..degree {
            result[j] = Gf256::mul(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = Gf256::mul(root, 0x02);
    }
    result
}

/// Data codewords of one block with their EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    /// Data codewords
    pub data: Vec<u8>,
    /// Error correction codewords
    pub ec: Vec<u8>,
}

/// Split `data` across the blocks of `spec` and compute EC codewords for each
pub fn build_blocks(data: &[u8], spec: &SymbolSpec) -> Result<Vec<CodewordBlock>, EncodingError> {
    if data.len() != spec.data_codewords {
        return Err(EncodingError::BitStreamOverflow {
            bits: data.len() * 8,
            capacity: spec.data_capacity_bits(),
        }
        .logged());
    }

    let rs = ReedSolomonEncoder::new(spec.ec_codewords_per_block());
    let mut offset = 0;
    let blocks = spec
        .blocks
        .iter()
        .map(|block| {
            let chunk = &data[offset..offset + block.data_codewords];
            offset += block.data_codewords;
            CodewordBlock {
                data: chunk.to_vec(),
                ec: rs.encode(chunk),
            }
        })
        .collect();
    Ok(blocks)
}

/// Interleave data codewords, then EC codewords, column by column across blocks
pub fn interleave(blocks: &[CodewordBlock], spec: &SymbolSpec) -> Result<Vec<u8>, EncodingError> {
    let mut result = Vec::with_capacity(spec.total_codewords);

    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..max_data {
        for block in blocks {
            if let Some(&cw) = block.data.get(i) {
                result.push(cw);
            }
        }
    }

    let max_ec = blocks.iter().map(|b| b.ec.len()).max().unwrap_or(0);
    for i in 0..max_ec {
        for block in blocks {
            if let Some(&cw) = block.ec.get(i) {
                result.push(cw);
            }
        }
    }

    if result.len() != spec.total_codewords {
        return Err(EncodingError::LayoutOverflow {
            bits: result.len() * 8,
            slots: spec.total_codewords * 8,
        }
        .logged());
    }
    Ok(result)
}

/// Compute EC codewords and produce the final interleaved codeword sequence
pub fn add_error_correction(data: &[u8], spec: &SymbolSpec) -> Result<Vec<u8>, EncodingError> {
    let blocks = build_blocks(data, spec)?;
    interleave(&blocks, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ECLevel, Version};

    #[test]
    fn test_gf256_basic() {
        // 0 * anything = 0
        assert_eq!(Gf256::mul(0, 5), 0);
        assert_eq!(Gf256::mul(5, 0), 0);

        // x / x = 1 (for x != 0)
        assert_eq!(Gf256::div(7, 7), 1);
        assert_eq!(Gf256::div(123, 123), 1);
        assert_eq!(Gf256::mul(Gf256::div(200, 13), 13), 200);

        // alpha^8 reduces by the primitive polynomial
        assert_eq!(Gf256::exp(8), 0x1D);
    }

    #[test]
    fn test_gf256_pow() {
        // alpha^255 = 1 (order of the multiplicative group)
        assert_eq!(Gf256::pow(2, 255), 1);
        assert_eq!(Gf256::pow(2, 256), 2);
        assert_eq!(Gf256::pow(2, 260), Gf256::pow(2, 5));
        assert_eq!(Gf256::pow(0, 10), 0);
        assert_eq!(Gf256::pow(0, 0), 1);
    }

    #[test]
    fn test_generator_degree_7() {
        assert_eq!(
            generator_polynomial(7),
            vec![127, 122, 154, 164, 11, 68, 117]
        );
    }

    #[test]
    fn test_hello_world_ec_codewords() {
        let data = [32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236];
        let rs = ReedSolomonEncoder::new(13);
        assert_eq!(
            rs.encode(&data),
            vec![168, 72, 22, 82, 217, 54, 156, 0, 46, 15, 180, 122, 16]
        );
    }

    #[test]
    fn test_hello_world_1m_ec_codewords() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let rs = ReedSolomonEncoder::new(10);
        assert_eq!(
            rs.encode(&data),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_interleave_uneven_blocks() {
        // 5-Q: blocks of 15, 15, 16, 16 data codewords
        let spec = SymbolSpec::new(Version::new(5).unwrap(), ECLevel::Q).unwrap();
        let data: Vec<u8> = (0..spec.data_codewords as u8).collect();
        let blocks = build_blocks(&data, &spec).unwrap();
        let out = interleave(&blocks, &spec).unwrap();

        assert_eq!(out.len(), spec.total_codewords);
        // First column: first codeword of each block
        assert_eq!(&out[..4], &[0, 15, 30, 46]);
        // Last data column only comes from the two long blocks
        assert_eq!(&out[60..62], &[45, 61]);
        // EC section starts with the first EC codeword of block 0
        assert_eq!(out[62], blocks[0].ec[0]);
        assert_eq!(out[63], blocks[1].ec[0]);
    }

    #[test]
    fn test_wrong_data_length_rejected() {
        let spec = SymbolSpec::new(Version::new(1).unwrap(), ECLevel::L).unwrap();
        assert!(build_blocks(&[0u8; 3], &spec).is_err());
    }
}
