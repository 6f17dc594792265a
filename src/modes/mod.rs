//! QR code data modes
//!
//! Each mode has a codec that packs characters into the bit stream and
//! unpacks them again:
//! - Numeric: digits (0-9), 10 bits per three digits
//! - Alphanumeric: digits, upper-case letters and ` $%*+-./:`
//! - Byte: arbitrary 8-bit data (UTF-8 text here)
//! - ECI: extended channel designator, no character data

use std::fmt;

use crate::models::Version;

/// Alphanumeric codec (0-9, A-Z, space, $%*+-./:)
pub mod alphanumeric;
/// Byte codec
pub mod byte;
/// ECI designator codec
pub mod eci;
/// Numeric codec
pub mod numeric;

pub use alphanumeric::AlphanumericCodec;
pub use byte::ByteCodec;
pub use eci::EciCodec;
pub use numeric::NumericCodec;

/// Segment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mode 0001
    Numeric,
    /// Mode 0010
    Alphanumeric,
    /// Mode 0100
    Byte,
    /// Mode 0111
    Eci,
}

impl Mode {
    /// Four-bit mode indicator
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Eci => 0b0111,
        }
    }

    /// Mode for a four-bit indicator; `None` for terminator and
    /// unsupported modes (Kanji, structured append, FNC1)
    pub fn from_indicator(bits: u32) -> Option<Self> {
        match bits {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            0b0111 => Some(Mode::Eci),
            _ => None,
        }
    }

    /// Width of the character count indicator for `version`
    pub fn char_count_bits(self, version: Version) -> usize {
        let class = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][class],
            Mode::Alphanumeric => [9, 11, 13][class],
            Mode::Byte => [8, 16, 16][class],
            Mode::Eci => 0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Eci => "ECI",
        };
        f.write_str(name)
    }
}
