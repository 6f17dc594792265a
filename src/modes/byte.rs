/// Byte mode codec (Mode 0100) for 8-bit data
use crate::bitstream::{BitBuffer, BitReader};

/// 8 bits per byte
pub struct ByteCodec;

impl ByteCodec {
    /// Payload length in bits for `count` bytes
    pub fn bit_length(count: usize) -> usize {
        count * 8
    }

    /// Append raw bytes to `out`
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for &byte in data {
            out.append_bits(u32::from(byte), 8);
        }
    }

    /// Read `character_count` raw bytes
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        (0..character_count)
            .map(|_| reader.read(8).map(|b| b as u8))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_roundtrip() {
        // "HI" in ASCII = 72, 73
        let mut buf = BitBuffer::new();
        ByteCodec::encode(b"HI", &mut buf);
        assert_eq!(buf.to_bytes(), vec![0x48, 0x49]);
        let mut reader = BitReader::new(buf.bits());
        assert_eq!(ByteCodec::decode(&mut reader, 2), Some(b"HI".to_vec()));
    }

    #[test]
    fn test_byte_decode_short_stream() {
        let bits = [true; 12];
        let mut reader = BitReader::new(&bits);
        assert_eq!(ByteCodec::decode(&mut reader, 2), None);
    }
}
