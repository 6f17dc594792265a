//! Data segmentation: splits input text into mode-tagged segments.

use std::fmt;
use std::str::FromStr;

use crate::bitstream::BitBuffer;
use crate::error::{QrError, Result};
use crate::models::Version;
use crate::modes::eci::{MAX_DESIGNATOR, UTF8_DESIGNATOR};
use crate::modes::{AlphanumericCodec, ByteCodec, EciCodec, Mode, NumericCodec};

mod optimal;

/// A run of characters encoded in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    /// Numeric segment; every character must be an ASCII digit
    pub fn numeric(digits: &str) -> Result<Self> {
        if let Some(ch) = digits.chars().find(|&c| !NumericCodec::is_member(c)) {
            return Err(QrError::InvalidCharacter {
                ch,
                mode: Mode::Numeric,
            });
        }
        let mut data = BitBuffer::with_capacity(NumericCodec::bit_length(digits.len()));
        NumericCodec::encode(digits.as_bytes(), &mut data);
        Ok(Self {
            mode: Mode::Numeric,
            num_chars: digits.len(),
            data,
        })
    }

    /// Alphanumeric segment; every character must be in `0-9A-Z $%*+-./:`
    pub fn alphanumeric(text: &str) -> Result<Self> {
        if let Some(ch) = text.chars().find(|&c| !AlphanumericCodec::is_member(c)) {
            return Err(QrError::InvalidCharacter {
                ch,
                mode: Mode::Alphanumeric,
            });
        }
        let mut data = BitBuffer::with_capacity(AlphanumericCodec::bit_length(text.len()));
        AlphanumericCodec::encode(text, &mut data);
        Ok(Self {
            mode: Mode::Alphanumeric,
            num_chars: text.len(),
            data,
        })
    }

    /// Byte segment over arbitrary data
    pub fn bytes(data: &[u8]) -> Self {
        let mut bits = BitBuffer::with_capacity(ByteCodec::bit_length(data.len()));
        ByteCodec::encode(data, &mut bits);
        Self {
            mode: Mode::Byte,
            num_chars: data.len(),
            data: bits,
        }
    }

    /// ECI designator segment
    pub fn eci(designator: u32) -> Result<Self> {
        if designator > MAX_DESIGNATOR {
            return Err(QrError::InvalidParameter(format!(
                "ECI designator {designator} exceeds {MAX_DESIGNATOR}"
            )));
        }
        let mut data = BitBuffer::new();
        EciCodec::encode(designator, &mut data);
        Ok(Self {
            mode: Mode::Eci,
            num_chars: 0,
            data,
        })
    }

    /// Segment for `text` in `mode`, validating membership
    pub fn with_mode(text: &str, mode: Mode) -> Result<Self> {
        match mode {
            Mode::Numeric => Self::numeric(text),
            Mode::Alphanumeric => Self::alphanumeric(text),
            Mode::Byte => Ok(Self::bytes(text.as_bytes())),
            Mode::Eci => Err(QrError::InvalidParameter(
                "ECI segments carry a designator, not text".to_string(),
            )),
        }
    }

    /// Segment mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Character count (bytes for byte mode, zero for ECI)
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Packed payload bits, without header
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Header plus payload bits of all `segments` at `version`, or `None`
    /// when a character count overflows its indicator
    pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
        segments.iter().try_fold(0usize, |acc, seg| {
            let cc_bits = seg.mode.char_count_bits(version);
            if seg.num_chars >> cc_bits != 0 {
                return None;
            }
            Some(acc + 4 + cc_bits + seg.data.len())
        })
    }

    /// Write mode indicator, character count and payload
    pub fn append_to(&self, version: Version, out: &mut BitBuffer) {
        out.append_bits(self.mode.indicator(), 4);
        out.append_bits(self.num_chars as u32, self.mode.char_count_bits(version));
        out.extend_from(&self.data);
    }
}

/// Segmentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Minimum total bit length over all mode switch points
    #[default]
    Optimal,
    /// One segment per maximal run of the narrowest eligible mode
    Runs,
}

impl FromStr for Strategy {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimal" => Ok(Strategy::Optimal),
            "runs" => Ok(Strategy::Runs),
            other => Err(QrError::InvalidParameter(format!(
                "unknown segmentation strategy '{other}' (expected optimal or runs)"
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Optimal => f.write_str("optimal"),
            Strategy::Runs => f.write_str("runs"),
        }
    }
}

/// Narrowest mode able to hold `ch`
pub fn classify(ch: char) -> Mode {
    if NumericCodec::is_member(ch) {
        Mode::Numeric
    } else if AlphanumericCodec::is_member(ch) {
        Mode::Alphanumeric
    } else {
        Mode::Byte
    }
}

/// Narrowest single mode able to hold all of `text`
pub fn narrowest_mode(text: &str) -> Mode {
    text.chars().map(classify).fold(Mode::Numeric, |acc, m| {
        match (acc, m) {
            (Mode::Byte, _) | (_, Mode::Byte) => Mode::Byte,
            (Mode::Alphanumeric, _) | (_, Mode::Alphanumeric) => Mode::Alphanumeric,
            _ => Mode::Numeric,
        }
    })
}

/// Split `text` into segments for symbols in the version class of `version`.
///
/// With `eci_utf8` set, non-ASCII text is prefixed with a UTF-8 ECI header.
pub fn segment_text(
    text: &str,
    strategy: Strategy,
    version: Version,
    eci_utf8: bool,
) -> Result<Vec<Segment>> {
    if text.is_empty() {
        return Err(QrError::EmptyInput);
    }
    let chars: Vec<char> = text.chars().collect();
    let modes = match strategy {
        Strategy::Optimal => optimal::char_modes(&chars, version),
        Strategy::Runs => chars.iter().map(|&c| classify(c)).collect(),
    };

    let mut segments = Vec::new();
    if eci_utf8 && !text.is_ascii() {
        segments.push(Segment::eci(UTF8_DESIGNATOR)?);
    }

    let mut start = 0;
    for end in 1..=chars.len() {
        if end < chars.len() && modes[end] == modes[start] {
            continue;
        }
        let run: String = chars[start..end].iter().collect();
        segments.push(Segment::with_mode(&run, modes[start])?);
        start = end;
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_numeric_segment_bits() {
        let seg = Segment::numeric("12345").unwrap();
        assert_eq!(seg.mode(), Mode::Numeric);
        assert_eq!(seg.num_chars(), 5);
        // 4 + 10 + 10 + 7
        assert_eq!(Segment::total_bits(&[seg], v(1)), Some(31));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            Segment::numeric("12a"),
            Err(QrError::InvalidCharacter { ch: 'a', mode: Mode::Numeric })
        ));
        assert!(matches!(
            Segment::alphanumeric("Hello"),
            Err(QrError::InvalidCharacter { ch: 'e', mode: Mode::Alphanumeric })
        ));
        assert!(Segment::eci(1_000_000).is_err());
    }

    #[test]
    fn test_count_overflow() {
        let seg = Segment::bytes(&[0u8; 256]);
        assert_eq!(Segment::total_bits(std::slice::from_ref(&seg), v(9)), None);
        assert_eq!(Segment::total_bits(&[seg], v(10)), Some(4 + 16 + 2048));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('7'), Mode::Numeric);
        assert_eq!(classify('Z'), Mode::Alphanumeric);
        assert_eq!(classify('z'), Mode::Byte);
        assert_eq!(narrowest_mode("12345"), Mode::Numeric);
        assert_eq!(narrowest_mode("HELLO 1"), Mode::Alphanumeric);
        assert_eq!(narrowest_mode("Hello"), Mode::Byte);
    }

    #[test]
    fn test_single_mode_inputs() {
        let segs = segment_text("HELLO", Strategy::Optimal, v(1), false).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Alphanumeric);

        let segs = segment_text("12345", Strategy::Optimal, v(1), false).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Numeric);
    }

    #[test]
    fn test_runs_strategy() {
        let segs = segment_text("abc123DEF", Strategy::Runs, v(1), false).unwrap();
        let modes: Vec<Mode> = segs.iter().map(Segment::mode).collect();
        assert_eq!(modes, vec![Mode::Byte, Mode::Numeric, Mode::Alphanumeric]);
        assert_eq!(segs[1].num_chars(), 3);
    }

    #[test]
    fn test_optimal_never_worse_than_runs() {
        for text in ["abc123DEF", "A1b2C3", "https://example.com/0123456789", "Zürich 8001"] {
            let optimal = segment_text(text, Strategy::Optimal, v(1), false).unwrap();
            let runs = segment_text(text, Strategy::Runs, v(1), false).unwrap();
            let single = [Segment::bytes(text.as_bytes())];
            let best = Segment::total_bits(&optimal, v(1)).unwrap();
            assert!(best <= Segment::total_bits(&runs, v(1)).unwrap(), "{text}");
            assert!(best <= Segment::total_bits(&single, v(1)).unwrap(), "{text}");
        }
    }

    #[test]
    fn test_eci_prefix() {
        let segs = segment_text("Grüße", Strategy::Optimal, v(1), true).unwrap();
        assert_eq!(segs[0].mode(), Mode::Eci);
        let segs = segment_text("plain", Strategy::Optimal, v(1), true).unwrap();
        assert_ne!(segs[0].mode(), Mode::Eci);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            segment_text("", Strategy::Runs, v(1), false),
            Err(QrError::EmptyInput)
        ));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("runs".parse::<Strategy>().unwrap(), Strategy::Runs);
        assert_eq!("Optimal".parse::<Strategy>().unwrap(), Strategy::Optimal);
        assert!("greedy".parse::<Strategy>().is_err());
    }
}
