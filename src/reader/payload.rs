//! Codeword de-interleaving, correction and segment parsing
use crate::bitstream::{BitReader, bytes_to_bits};
use crate::encoder::tables::ec_block_info;
use crate::error::{QrError, Result};
use crate::models::{EcLevel, Version};
use crate::modes::{AlphanumericCodec, ByteCodec, EciCodec, Mode, NumericCodec};

use super::correction::ReedSolomonDecoder;

/// Undo interleaving, correct every block and return the data codewords
/// plus the number of corrected codewords
pub fn correct_codewords(
    codewords: &[u8],
    version: Version,
    ec_level: EcLevel,
) -> Result<(Vec<u8>, usize)> {
    let info = ec_block_info(version, ec_level);
    let total = info.total_data() + info.ecc_per_block * info.num_blocks;
    if codewords.len() < total {
        return Err(QrError::Unreadable("too few codewords".to_string()));
    }

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|i| Vec::with_capacity(info.data_len(i) + info.ecc_per_block))
        .collect();
    let mut iter = codewords.iter().copied();
    for column in 0..=info.short_block_data {
        for (index, block) in blocks.iter_mut().enumerate() {
            if column < info.data_len(index) {
                block.extend(iter.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(iter.next());
        }
    }

    let decoder = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.total_data());
    let mut corrected = 0;
    for (index, block) in blocks.iter_mut().enumerate() {
        corrected += decoder
            .decode(block)
            .map_err(|e| QrError::Unreadable(format!("block {index}: {e}")))?;
        data.extend_from_slice(&block[..info.data_len(index)]);
    }
    Ok((data, corrected))
}

/// Segments recovered from the data codewords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Decoded text
    pub text: String,
    /// Mode of every segment in stream order
    pub modes: Vec<Mode>,
    /// Last ECI designator seen, if any
    pub eci: Option<u32>,
}

/// Parse segments until the terminator or the end of the data
pub fn parse_segments(data: &[u8], version: Version) -> Result<ParsedPayload> {
    let bits = bytes_to_bits(data);
    let mut reader = BitReader::new(&bits);
    let mut bytes = Vec::new();
    let mut payload = ParsedPayload::default();
    let truncated = || QrError::Unreadable("segment runs past the end of the data".to_string());

    while reader.remaining() >= 4 {
        let indicator = reader.read(4).ok_or_else(truncated)?;
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)
            .ok_or_else(|| QrError::Unreadable(format!("unsupported mode {indicator:04b}")))?;
        payload.modes.push(mode);

        if mode == Mode::Eci {
            payload.eci = Some(EciCodec::decode(&mut reader).ok_or_else(truncated)?);
            continue;
        }

        let count = reader
            .read(mode.char_count_bits(version))
            .ok_or_else(truncated)? as usize;
        match mode {
            Mode::Numeric => {
                let digits = NumericCodec::decode(&mut reader, count).ok_or_else(truncated)?;
                bytes.extend_from_slice(digits.as_bytes());
            }
            Mode::Alphanumeric => {
                let text = AlphanumericCodec::decode(&mut reader, count).ok_or_else(truncated)?;
                bytes.extend_from_slice(text.as_bytes());
            }
            _ => bytes.extend(ByteCodec::decode(&mut reader, count).ok_or_else(truncated)?),
        }
    }

    // Byte segments without a UTF-8 designator fall back to ISO-8859-1
    payload.text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    };
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::codewords::{add_ecc_and_interleave, data_codewords};
    use crate::segmenter::Segment;

    #[test]
    fn test_correct_interleaved_blocks() {
        let version = Version::new(5).unwrap();
        let data: Vec<u8> = (0..62).collect();
        let mut all = add_ecc_and_interleave(&data, version, EcLevel::Q);
        all[0] ^= 0xFF;
        all[5] ^= 0x0F;
        let (recovered, corrected) = correct_codewords(&all, version, EcLevel::Q).unwrap();
        assert_eq!(recovered, data);
        assert_eq!(corrected, 2);
    }

    #[test]
    fn test_parse_mixed_segments() {
        let segments = [
            Segment::eci(26).unwrap(),
            Segment::bytes("é-".as_bytes()),
            Segment::numeric("0123").unwrap(),
            Segment::alphanumeric("AB").unwrap(),
        ];
        let data = data_codewords(&segments, Version::MIN, EcLevel::L);
        let parsed = parse_segments(&data, Version::MIN).unwrap();
        assert_eq!(parsed.text, "é-0123AB");
        assert_eq!(parsed.eci, Some(26));
        assert_eq!(
            parsed.modes,
            vec![Mode::Eci, Mode::Byte, Mode::Numeric, Mode::Alphanumeric]
        );
    }

    #[test]
    fn test_latin1_fallback() {
        let data = data_codewords(&[Segment::bytes(&[0xE9])], Version::MIN, EcLevel::L);
        assert_eq!(parse_segments(&data, Version::MIN).unwrap().text, "é");
    }
}
