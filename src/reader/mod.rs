//! Reads a module matrix back into text.
//!
//! Used to verify generated symbols: format information, unmasking, zig-zag
//! extraction, de-interleaving, Reed-Solomon correction and segment parsing.

mod correction;
/// Format and version information extraction
pub mod format;
/// Block correction and segment parsing
pub mod payload;

use crate::encoder::{function_patterns, placement};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, EcLevel, MaskPattern, QrCode, Version};
use crate::modes::Mode;

pub use correction::ReedSolomonDecoder;
pub use format::FormatInfo;

/// Result of reading a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered text
    pub text: String,
    /// Symbol version
    pub version: Version,
    /// Error correction level from the format information
    pub ec_level: EcLevel,
    /// Mask pattern from the format information
    pub mask: MaskPattern,
    /// Segment modes in stream order
    pub modes: Vec<Mode>,
    /// ECI designator, if one was present
    pub eci: Option<u32>,
    /// Codewords repaired by error correction
    pub corrected_codewords: usize,
}

/// Read a square module matrix (`true` = dark, no quiet zone)
pub fn read(matrix: &BitMatrix) -> Result<Decoded> {
    let version = format::extract_version(matrix)?;
    let info = FormatInfo::extract(matrix)?;

    let reserved = function_patterns::build(version);
    let bits: Vec<bool> = placement::data_positions(&reserved)
        .into_iter()
        .map(|(x, y)| matrix.get(x, y) ^ info.mask_pattern.is_masked(y, x))
        .collect();
    let codewords: Vec<u8> = bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();

    let (data, corrected_codewords) =
        payload::correct_codewords(&codewords, version, info.ec_level)?;
    let parsed = payload::parse_segments(&data, version)?;
    if parsed.modes.is_empty() {
        return Err(QrError::Unreadable("symbol carries no segments".to_string()));
    }

    Ok(Decoded {
        text: parsed.text,
        version,
        ec_level: info.ec_level,
        mask: info.mask_pattern,
        modes: parsed.modes,
        eci: parsed.eci,
        corrected_codewords,
    })
}

/// Read a finished symbol
pub fn read_code(code: &QrCode) -> Result<Decoded> {
    read(code.grid().modules())
}
