/// Alphanumeric mode codec (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::bitstream::{BitBuffer, BitReader};

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericCodec;

impl AlphanumericCodec {
    /// Table index of `ch`
    pub fn index_of(ch: char) -> Option<u32> {
        ALPHANUMERIC_TABLE
            .iter()
            .position(|&c| c == ch)
            .map(|i| i as u32)
    }

    /// Whether `ch` belongs to the alphanumeric set
    pub fn is_member(ch: char) -> bool {
        Self::index_of(ch).is_some()
    }

    /// Payload length in bits for `count` characters
    pub fn bit_length(count: usize) -> usize {
        count / 2 * 11 + (count % 2) * 6
    }

    /// Append `text` to `out`; every character must be a member
    pub fn encode(text: &str, out: &mut BitBuffer) {
        let values: Vec<u32> = text.chars().filter_map(Self::index_of).collect();
        for pair in values.chunks(2) {
            match *pair {
                [a, b] => out.append_bits(a * 45 + b, 11),
                [a] => out.append_bits(a, 6),
                _ => {}
            }
        }
    }

    /// Decode `character_count` characters
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = reader.read(11)? as usize;
                let (first, second) = (value / 45, value % 45);
                result.push(*ALPHANUMERIC_TABLE.get(first)?);
                result.push(ALPHANUMERIC_TABLE[second]);
                chars_remaining -= 2;
            } else {
                let value = reader.read(6)? as usize;
                result.push(*ALPHANUMERIC_TABLE.get(value)?);
                chars_remaining -= 1;
            }
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_encode() {
        // "A1" = (10 * 45 + 1) = 451 (11 bits), then "B" = 11 (6 bits)
        let mut buf = BitBuffer::new();
        AlphanumericCodec::encode("A1B", &mut buf);
        assert_eq!(buf.len(), AlphanumericCodec::bit_length(3));
        let mut reader = BitReader::new(buf.bits());
        assert_eq!(reader.read(11), Some(451));
        assert_eq!(reader.read(6), Some(11));
    }

    #[test]
    fn test_alphanumeric_decode() {
        let mut buf = BitBuffer::new();
        AlphanumericCodec::encode("HELLO WORLD", &mut buf);
        let mut reader = BitReader::new(buf.bits());
        assert_eq!(
            AlphanumericCodec::decode(&mut reader, 11).as_deref(),
            Some("HELLO WORLD")
        );
    }

    #[test]
    fn test_membership() {
        assert!(AlphanumericCodec::is_member(':'));
        assert!(AlphanumericCodec::is_member(' '));
        assert!(!AlphanumericCodec::is_member('a'));
        assert!(!AlphanumericCodec::is_member('#'));
    }
}
