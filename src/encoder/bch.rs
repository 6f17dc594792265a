/// BCH codes protecting format information (15,5) and version information (18,6)
use crate::models::{EcLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Format and version codewords
pub struct Bch;

impl Bch {
    /// 15-bit format information for `ec_level` and `mask`, already XORed
    /// with the fixed mask pattern
    pub fn format_bits(ec_level: EcLevel, mask: MaskPattern) -> u16 {
        let data = u32::from(ec_level.format_bits()) << 3 | u32::from(mask.bits());
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
        }
        ((data << 10 | rem) ^ FORMAT_XOR_MASK) as u16
    }

    /// 18-bit version information; only meaningful for version 7 and up
    pub fn version_bits(version: Version) -> u32 {
        let data = u32::from(version.number());
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
        }
        data << 12 | rem
    }

    /// Nearest valid format codeword within Hamming distance 3
    pub fn decode_format(bits: u16) -> Option<(EcLevel, MaskPattern)> {
        let mut best: Option<(u32, EcLevel, MaskPattern)> = None;
        for level in EcLevel::ALL {
            for mask in MaskPattern::ALL {
                let distance = (Self::format_bits(level, mask) ^ bits).count_ones();
                if best.is_none_or(|(d, _, _)| distance < d) {
                    best = Some((distance, level, mask));
                }
            }
        }
        best.filter(|&(d, _, _)| d <= 3).map(|(_, l, m)| (l, m))
    }

    /// Nearest valid version codeword (7-40) within Hamming distance 3
    pub fn decode_version(bits: u32) -> Option<Version> {
        Version::range(Version::new(7).ok()?, Version::MAX)
            .map(|v| ((Self::version_bits(v) ^ bits).count_ones(), v))
            .min_by_key(|&(d, _)| d)
            .filter(|&(d, _)| d <= 3)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits() {
        assert_eq!(Bch::format_bits(EcLevel::M, MaskPattern::Pattern0), 0x5412);
        assert_eq!(
            Bch::format_bits(EcLevel::L, MaskPattern::Pattern4),
            0b110011000101111
        );
    }

    #[test]
    fn test_version_bits() {
        assert_eq!(Bch::version_bits(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(Bch::version_bits(Version::MAX), 0x28C69);
    }

    #[test]
    fn test_format_decode_with_errors() {
        let bits = Bch::format_bits(EcLevel::Q, MaskPattern::Pattern5);
        assert_eq!(
            Bch::decode_format(bits),
            Some((EcLevel::Q, MaskPattern::Pattern5))
        );
        assert_eq!(
            Bch::decode_format(bits ^ 0b100_0000_0100_0001),
            Some((EcLevel::Q, MaskPattern::Pattern5))
        );
    }

    #[test]
    fn test_version_decode_with_errors() {
        let v = Version::new(21).unwrap();
        assert_eq!(Bch::decode_version(Bch::version_bits(v) ^ 0b101), Some(v));
        assert_eq!(Bch::decode_version(0), None);
    }
}
