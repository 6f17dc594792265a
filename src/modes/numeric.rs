/// Numeric mode codec (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::bitstream::{BitBuffer, BitReader};

/// Packs and unpacks decimal digits
pub struct NumericCodec;

impl NumericCodec {
    /// Whether `ch` belongs to the numeric set
    pub fn is_member(ch: char) -> bool {
        ch.is_ascii_digit()
    }

    /// Payload length in bits for `count` digits
    pub fn bit_length(count: usize) -> usize {
        count / 3 * 10 + [0, 4, 7][count % 3]
    }

    /// Append the digits of `text` to `out`; `text` must be all digits
    pub fn encode(text: &[u8], out: &mut BitBuffer) {
        for group in text.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
            out.append_bits(value, group.len() * 3 + 1);
        }
    }

    /// Decode `character_count` digits
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let value = reader.read(group_size * 3 + 1)?;
            let limit = 10u32.pow(group_size as u32);
            if value >= limit {
                return None;
            }
            result.push_str(&format!("{:0width$}", value, width = group_size));
            chars_remaining -= group_size;
        }

        Some(result)
    }
}
