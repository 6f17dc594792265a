//! Symbol encoder: version selection, codeword assembly, placement and
//! masking.

/// BCH codes for format and version information
pub mod bch;
/// Padding, Reed-Solomon blocks and interleaving
pub mod codewords;
/// Format and version information placement
pub mod format;
/// Finder, timing and alignment patterns
pub mod function_patterns;
/// Mask application and penalty scoring
pub mod mask;
/// Zig-zag codeword placement
pub mod placement;
/// GF(256) arithmetic and the Reed-Solomon encoder
pub mod reed_solomon;
/// Block structure and capacity tables
pub mod tables;

use crate::error::{QrError, Result};
use crate::models::{EcLevel, MaskPattern, QrCode, Version};
use crate::modes::NumericCodec;
use crate::segmenter::{self, Segment, Strategy};

use tables::data_capacity_bits;

/// Most characters any symbol can hold (numeric, 40-L)
pub const MAX_INPUT_CHARS: usize = 7089;

/// Encoding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Requested error correction level
    pub ec_level: EcLevel,
    /// Fixed version; `None` picks the smallest that fits
    pub version: Option<Version>,
    /// Fixed mask; `None` picks the lowest penalty
    pub mask: Option<MaskPattern>,
    /// Raise the error correction level while the version stays the same
    pub boost_ecc: bool,
    /// Segmentation policy for text input
    pub strategy: Strategy,
    /// Prefix non-ASCII text with a UTF-8 ECI header
    pub eci_utf8: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(EcLevel::M)
    }
}

impl EncodeOptions {
    /// Options for `ec_level` with automatic version and mask
    pub fn new(ec_level: EcLevel) -> Self {
        Self {
            ec_level,
            version: None,
            mask: None,
            boost_ecc: false,
            strategy: Strategy::Optimal,
            eci_utf8: false,
        }
    }

    /// Pin the version
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Pin the mask pattern
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Enable or disable error correction boosting
    pub fn with_boost_ecc(mut self, boost: bool) -> Self {
        self.boost_ecc = boost;
        self
    }

    /// Choose the segmentation strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the UTF-8 ECI header
    pub fn with_eci_utf8(mut self, eci_utf8: bool) -> Self {
        self.eci_utf8 = eci_utf8;
        self
    }

    fn version_range(&self) -> (Version, Version) {
        match self.version {
            Some(v) => (v, v),
            None => (Version::MIN, Version::MAX),
        }
    }
}

/// Encoding decisions taken before any module is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Segments in stream order
    pub segments: Vec<Segment>,
    /// Chosen version
    pub version: Version,
    /// Final error correction level (after boosting)
    pub ec_level: EcLevel,
    /// Header and payload bits of all segments
    pub data_bits: usize,
    /// Data bits available at `version` / `ec_level`
    pub capacity_bits: usize,
    /// Fixed mask, if one was requested
    pub mask: Option<MaskPattern>,
}

impl Plan {
    /// Plan the encoding of `text`
    pub fn for_text(text: &str, options: &EncodeOptions) -> Result<Self> {
        if text.is_empty() {
            return Err(QrError::EmptyInput);
        }
        let (min, max) = options.version_range();
        let char_count = text.chars().count();
        if char_count > MAX_INPUT_CHARS {
            return Err(QrError::CapacityExceeded {
                needed_bits: 4 + 14 + NumericCodec::bit_length(char_count),
                capacity_bits: data_capacity_bits(max, options.ec_level),
                ec_level: options.ec_level,
            });
        }

        // Segment lengths only change at the version class boundaries
        let mut segments = Vec::new();
        for version in Version::range(min, max) {
            if version == min || matches!(version.number(), 10 | 27) {
                segments =
                    segmenter::segment_text(text, options.strategy, version, options.eci_utf8)?;
            }
            if let Some(plan) = Self::try_fit(&segments, version, options) {
                return Ok(plan);
            }
        }
        Err(Self::overflow(&segments, max, options.ec_level))
    }

    /// Plan the encoding of pre-built segments
    pub fn for_segments(segments: &[Segment], options: &EncodeOptions) -> Result<Self> {
        if segments.is_empty() {
            return Err(QrError::EmptyInput);
        }
        let (min, max) = options.version_range();
        Version::range(min, max)
            .find_map(|version| Self::try_fit(segments, version, options))
            .ok_or_else(|| Self::overflow(segments, max, options.ec_level))
    }

    fn try_fit(segments: &[Segment], version: Version, options: &EncodeOptions) -> Option<Self> {
        let data_bits = Segment::total_bits(segments, version)?;
        if data_bits > data_capacity_bits(version, options.ec_level) {
            return None;
        }
        let mut ec_level = options.ec_level;
        if options.boost_ecc {
            for level in [EcLevel::M, EcLevel::Q, EcLevel::H] {
                if level > ec_level && data_bits <= data_capacity_bits(version, level) {
                    ec_level = level;
                }
            }
        }
        Some(Self {
            segments: segments.to_vec(),
            version,
            ec_level,
            data_bits,
            capacity_bits: data_capacity_bits(version, ec_level),
            mask: options.mask,
        })
    }

    fn overflow(segments: &[Segment], max: Version, ec_level: EcLevel) -> QrError {
        let needed_bits = segments
            .iter()
            .map(|s| 4 + s.mode().char_count_bits(max) + s.data().len())
            .sum();
        QrError::CapacityExceeded {
            needed_bits,
            capacity_bits: data_capacity_bits(max, ec_level),
            ec_level,
        }
    }

    /// Data and ECC codewords in placement order
    pub fn codewords(&self) -> Vec<u8> {
        let data = codewords::data_codewords(&self.segments, self.version, self.ec_level);
        codewords::add_ecc_and_interleave(&data, self.version, self.ec_level)
    }

    /// Grid with function patterns and unmasked data
    pub fn unmasked_grid(&self) -> crate::models::ModuleGrid {
        let mut grid = function_patterns::build(self.version);
        placement::place_codewords(&mut grid, &self.codewords());
        grid
    }

    /// Draw the finished symbol
    pub fn build(&self) -> QrCode {
        let grid = self.unmasked_grid();
        let (mask, grid) = match self.mask {
            Some(fixed) => (fixed, mask::masked(&grid, self.ec_level, fixed)),
            None => {
                let best = mask::select_best(&grid, self.ec_level);
                (best.mask, best.grid)
            }
        };
        QrCode::new(self.version, self.ec_level, mask, grid)
    }
}

/// Encode text into a finished symbol
pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<QrCode> {
    Ok(Plan::for_text(text, options)?.build())
}

/// Encode pre-built segments into a finished symbol
pub fn encode_segments(segments: &[Segment], options: &EncodeOptions) -> Result<QrCode> {
    Ok(Plan::for_segments(segments, options)?.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::Mode;

    #[test]
    fn test_smallest_version_chosen() {
        let plan = Plan::for_text("HELLO", &EncodeOptions::new(EcLevel::Q)).unwrap();
        assert_eq!(plan.version, Version::MIN);
        assert_eq!(plan.segments[0].mode(), Mode::Alphanumeric);

        let long = "A".repeat(100);
        let plan = Plan::for_text(&long, &EncodeOptions::new(EcLevel::L)).unwrap();
        // 4 + 9 + 50 * 11 = 563 bits; 4-L holds 640
        assert_eq!(plan.version, Version::new(4).unwrap());
        assert_eq!(plan.data_bits, 563);
    }

    #[test]
    fn test_boost_ecc() {
        let options = EncodeOptions::new(EcLevel::L).with_boost_ecc(true);
        let plan = Plan::for_text("12345", &options).unwrap();
        assert_eq!(plan.version, Version::MIN);
        assert_eq!(plan.ec_level, EcLevel::H);
    }

    #[test]
    fn test_fixed_version_overflow() {
        let options = EncodeOptions::new(EcLevel::H).with_version(Version::MIN);
        let err = Plan::for_text("HELLO WORLD HELLO WORLD", &options).unwrap_err();
        assert!(matches!(
            err,
            QrError::CapacityExceeded { capacity_bits: 72, ec_level: EcLevel::H, .. }
        ));
    }

    #[test]
    fn test_fixed_mask() {
        let options = EncodeOptions::default().with_mask(MaskPattern::Pattern3);
        let code = encode_text("fixed", &options).unwrap();
        assert_eq!(code.mask(), MaskPattern::Pattern3);
    }

    #[test]
    fn test_pre_check_rejects_huge_input() {
        let text = "1".repeat(MAX_INPUT_CHARS + 1);
        assert!(matches!(
            encode_text(&text, &EncodeOptions::new(EcLevel::L)),
            Err(QrError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_empty_segments() {
        assert!(matches!(
            encode_segments(&[], &EncodeOptions::default()),
            Err(QrError::EmptyInput)
        ));
    }
}
