//! Error type shared by every stage of the pipeline.

use thiserror::Error;

use crate::models::EcLevel;
use crate::modes::Mode;

/// Errors produced while encoding, rendering, reading or saving a symbol.
#[derive(Debug, Error)]
pub enum QrError {
    /// The input text was empty.
    #[error("input text is empty")]
    EmptyInput,

    /// A character was passed to a segment constructor that cannot hold it.
    #[error("character {ch:?} cannot be encoded in {mode} mode")]
    InvalidCharacter {
        /// Offending character
        ch: char,
        /// Mode that rejected it
        mode: Mode,
    },

    /// A version number outside 1..=40 was requested.
    #[error("version {0} is outside the supported range 1..=40")]
    InvalidVersion(u8),

    /// The data does not fit in any allowed symbol.
    #[error(
        "data needs {needed_bits} bits but at most {capacity_bits} fit at error correction level {ec_level}"
    )]
    CapacityExceeded {
        /// Bits required by the segments (header + payload)
        needed_bits: usize,
        /// Data bits available in the largest allowed version
        capacity_bits: usize,
        /// Requested error correction level
        ec_level: EcLevel,
    },

    /// A render or configuration parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A module matrix could not be read back into text.
    #[error("symbol could not be read: {0}")]
    Unreadable(String),

    /// Save was requested while no symbol is being shown.
    #[error("there is no QR code to save")]
    NothingToSave,

    /// The image codec failed to write the output file.
    #[error("failed to write image: {0}")]
    Persistence(#[from] image::ImageError),

    /// Filesystem failure around persistence.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QrError>;
