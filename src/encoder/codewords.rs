//! Bit stream assembly, padding and Reed-Solomon interleaving.

use crate::bitstream::BitBuffer;
use crate::models::{EcLevel, Version};
use crate::segmenter::Segment;

use super::reed_solomon::ReedSolomonEncoder;
use super::tables::{ec_block_info, num_data_codewords};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Data codewords for `segments`: headers, payloads, terminator, bit padding
/// and alternating pad bytes up to the exact capacity.
///
/// The caller guarantees the segments fit.
pub fn data_codewords(segments: &[Segment], version: Version, ec_level: EcLevel) -> Vec<u8> {
    let capacity_bits = num_data_codewords(version, ec_level) * 8;
    let mut bits = BitBuffer::with_capacity(capacity_bits);
    for segment in segments {
        segment.append_to(version, &mut bits);
    }
    debug_assert!(bits.len() <= capacity_bits);

    let terminator = (capacity_bits - bits.len()).min(4);
    bits.append_bits(0, terminator);
    let fill = (8 - bits.len() % 8) % 8;
    bits.append_bits(0, fill);

    let mut codewords = bits.to_bytes();
    let mut pad = PAD_BYTES.iter().cycle();
    while codewords.len() < capacity_bits / 8 {
        if let Some(&byte) = pad.next() {
            codewords.push(byte);
        }
    }
    codewords
}

/// Split data into blocks, append ECC to each and interleave: data columns
/// first, then ECC columns
pub fn add_ecc_and_interleave(data: &[u8], version: Version, ec_level: EcLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    debug_assert_eq!(data.len(), info.total_data());
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for index in 0..info.num_blocks {
        let len = info.data_len(index);
        let block = &data[offset..offset + len];
        blocks.push((block, rs.remainder(block)));
        offset += len;
    }

    let longest = info.short_block_data + 1;
    let mut result = Vec::with_capacity(data.len() + info.ecc_per_block * info.num_blocks);
    for column in 0..longest {
        result.extend(blocks.iter().filter_map(|(block, _)| block.get(column)));
    }
    for column in 0..info.ecc_per_block {
        result.extend(blocks.iter().map(|(_, ecc)| ecc[column]));
    }
    result
}
