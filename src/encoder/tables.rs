use crate::error::EncodingError;
use crate::models::{ECLevel, Version};

// Tables from the QR Code specification (Model 2).
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// One Reed-Solomon block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    /// Data codewords in this block
    pub data_codewords: usize,
    /// EC codewords in this block
    pub ec_codewords: usize,
}

/// Codeword layout for one (version, EC level) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data plus EC codewords
    pub total_codewords: usize,
    /// Data codewords only
    pub data_codewords: usize,
    /// Blocks in interleave order (short blocks first)
    pub blocks: Vec<BlockSpec>,
}

impl SymbolSpec {
    /// Look up the layout for `version` at `ec_level`
    pub fn new(version: Version, ec_level: ECLevel) -> Result<Self, EncodingError> {
        let malformed = || {
            EncodingError::MalformedTable {
                version: version.number(),
                ec_level,
            }
            .logged()
        };

        let idx = ec_level.ordinal();
        let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version.number() as usize];
        let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version.number() as usize];
        if ecc <= 0 || num_blocks <= 0 {
            return Err(malformed());
        }
        let (ecc, num_blocks) = (ecc as usize, num_blocks as usize);

        let total_codewords = num_raw_data_modules(version) / 8;
        let ecc_total = ecc * num_blocks;
        if total_codewords <= ecc_total {
            return Err(malformed());
        }
        let data_codewords = total_codewords - ecc_total;

        let short_len = data_codewords / num_blocks;
        let num_long_blocks = data_codewords % num_blocks;
        let num_short_blocks = num_blocks - num_long_blocks;
        let blocks: Vec<BlockSpec> = (0..num_blocks)
            .map(|b| BlockSpec {
                data_codewords: if b < num_short_blocks {
                    short_len
                } else {
                    short_len + 1
                },
                ec_codewords: ecc,
            })
            .collect();

        let sum: usize = blocks
            .iter()
            .map(|b| b.data_codewords + b.ec_codewords)
            .sum();
        if sum != total_codewords || short_len == 0 {
            return Err(malformed());
        }

        Ok(Self {
            version,
            ec_level,
            total_codewords,
            data_codewords,
            blocks,
        })
    }

    /// Data capacity in bits
    pub fn data_capacity_bits(&self) -> usize {
        self.data_codewords * 8
    }

    /// Number of EC codewords per block (uniform across blocks)
    pub fn ec_codewords_per_block(&self) -> usize {
        self.blocks.first().map_or(0, |b| b.ec_codewords)
    }
}

/// Modules available for codewords and remainder bits at `version`
pub fn num_raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}
