/// ECI designator codec (Mode 0111)
use crate::bitstream::{BitBuffer, BitReader};

/// ECI assignment number for UTF-8
pub const UTF8_DESIGNATOR: u32 = 26;

/// Largest assignable designator
pub const MAX_DESIGNATOR: u32 = 999_999;

/// Designators take 8, 16 or 24 bits depending on magnitude
pub struct EciCodec;

impl EciCodec {
    /// Bits used by `designator`, or `None` above [`MAX_DESIGNATOR`]
    pub fn bit_length(designator: u32) -> Option<usize> {
        match designator {
            0..=0x7F => Some(8),
            0x80..=0x3FFF => Some(16),
            0x4000..=MAX_DESIGNATOR => Some(24),
            _ => None,
        }
    }

    /// Append `designator`; callers validate the range first
    pub fn encode(designator: u32, out: &mut BitBuffer) {
        match designator {
            0..=0x7F => out.append_bits(designator, 8),
            0x80..=0x3FFF => out.append_bits(0b10 << 14 | designator, 16),
            _ => out.append_bits(0b110 << 21 | designator, 24),
        }
    }

    /// Read one designator
    pub fn decode(reader: &mut BitReader<'_>) -> Option<u32> {
        let first = reader.read(8)?;
        if first & 0x80 == 0 {
            Some(first)
        } else if first & 0xC0 == 0x80 {
            Some((first & 0x3F) << 8 | reader.read(8)?)
        } else if first & 0xE0 == 0xC0 {
            Some((first & 0x1F) << 16 | reader.read(16)?)
        } else {
            None
        }
    }
}
