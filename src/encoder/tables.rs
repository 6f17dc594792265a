//! Capacity tables for Model 2 symbols.

use crate::models::{EcLevel, Version};

/// Block structure for one version / error correction level pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Total number of blocks
    pub num_blocks: usize,
    /// ECC codewords appended to every block
    pub ecc_per_block: usize,
    /// Data codewords in a short block
    pub short_block_data: usize,
    /// Number of short blocks; the rest carry one extra data codeword
    pub num_short_blocks: usize,
}

impl EcBlockInfo {
    /// Data codewords in block `index`
    pub fn data_len(&self, index: usize) -> usize {
        self.short_block_data + usize::from(index >= self.num_short_blocks)
    }

    /// Total data codewords over all blocks
    pub fn total_data(&self) -> usize {
        self.short_block_data * self.num_blocks + (self.num_blocks - self.num_short_blocks)
    }
}

// Tables from ISO/IEC 18004 (Model 2) via Nayuki QR Code generator.
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

/// Block structure of `version` at `ec_level`
pub fn ec_block_info(version: Version, ec_level: EcLevel) -> EcBlockInfo {
    let idx = ec_level.index();
    let v = version.number() as usize;
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let raw_codewords = num_raw_data_modules(version) / 8;
    let short_block_len = raw_codewords / num_blocks;
    EcBlockInfo {
        num_blocks,
        ecc_per_block,
        short_block_data: short_block_len - ecc_per_block,
        num_short_blocks: num_blocks - raw_codewords % num_blocks,
    }
}

/// Modules available for data and ECC bits (includes remainder bits)
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

/// Data codewords (8 bits each) available at `version` / `ec_level`
pub fn num_data_codewords(version: Version, ec_level: EcLevel) -> usize {
    let info = ec_block_info(version, ec_level);
    num_raw_data_modules(version) / 8 - info.ecc_per_block * info.num_blocks
}

/// Data bits available at `version` / `ec_level`
pub fn data_capacity_bits(version: Version, ec_level: EcLevel) -> usize {
    num_data_codewords(version, ec_level) * 8
}
