//! Format and version information extraction

use crate::encoder::bch::Bch;
use crate::encoder::format::{format_positions, version_positions};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, EcLevel, MaskPattern, Version};

/// Format info is 15 bits (5 data + 10 ECC), stored twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: EcLevel,
    /// Data mask
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Read the top-left copy, falling back to the split copy
    pub fn extract(matrix: &BitMatrix) -> Result<Self> {
        let (first, second) = format_positions(matrix.width());
        [first, second]
            .iter()
            .find_map(|positions| {
                let bits = positions
                    .iter()
                    .enumerate()
                    .fold(0u16, |acc, (i, &(x, y))| acc | (matrix.get(x, y) as u16) << i);
                Bch::decode_format(bits)
            })
            .map(|(ec_level, mask_pattern)| Self {
                ec_level,
                mask_pattern,
            })
            .ok_or_else(|| QrError::Unreadable("format information is damaged".to_string()))
    }
}

/// Version implied by the matrix size, cross-checked against the version
/// information blocks from version 7 up
pub fn extract_version(matrix: &BitMatrix) -> Result<Version> {
    if matrix.width() != matrix.height() {
        return Err(QrError::Unreadable(format!(
            "matrix is {}x{}, not square",
            matrix.width(),
            matrix.height()
        )));
    }
    let version = Version::from_size(matrix.width()).ok_or_else(|| {
        QrError::Unreadable(format!("{} is not a valid symbol size", matrix.width()))
    })?;
    if version.number() < 7 {
        return Ok(version);
    }

    let positions = version_positions(matrix.width());
    let read = |pick: fn(&((usize, usize), (usize, usize))) -> (usize, usize)| {
        positions.iter().enumerate().fold(0u32, |acc, (i, pos)| {
            let (x, y) = pick(pos);
            acc | (matrix.get(x, y) as u32) << i
        })
    };
    let decoded = [read(|p| p.0), read(|p| p.1)]
        .into_iter()
        .find_map(Bch::decode_version);
    match decoded {
        Some(found) if found != version => Err(QrError::Unreadable(format!(
            "version information says {found} but size implies {version}"
        ))),
        _ => Ok(version),
    }
}
