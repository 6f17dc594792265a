//! rust_qrgen - QR code generation in pure Rust
//!
//! Turns text into a QR Code Model 2 symbol (versions 1-40, all four error
//! correction levels) and renders it as a grayscale image, text art or SVG.
//!
//! ```
//! let code = rust_qrgen::encode("HELLO WORLD").unwrap();
//! assert_eq!(code.size(), 21);
//! let image = rust_qrgen::render(&code, 10, 40).unwrap();
//! assert_eq!(image.dimensions(), (290, 290));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Bit buffers shared by the segmenter, encoder and reader
pub mod bitstream;
/// Environment-driven defaults
pub mod config;
/// Symbol encoder (capacity tables, Reed-Solomon, placement, masking)
pub mod encoder;
/// Error type
pub mod error;
/// Core data structures (QrCode, ModuleGrid, BitMatrix, Version, etc.)
pub mod models;
/// Data mode codecs (numeric, alphanumeric, byte, ECI)
pub mod modes;
/// UI-independent live-preview state
pub mod preview;
/// Reads finished module matrices back into text
pub mod reader;
/// Raster, text and SVG output
pub mod render;
/// Text segmentation into mode runs
pub mod segmenter;
/// PNG persistence, statistics and tracing setup
pub mod tools;

pub use encoder::{EncodeOptions, Plan};
pub use error::{QrError, Result};
pub use models::{BitMatrix, EcLevel, MaskPattern, Module, ModuleGrid, QrCode, Version};
pub use modes::Mode;
pub use reader::{Decoded, read, read_code};
pub use render::RenderOptions;
pub use segmenter::{Segment, Strategy};

use image::{GrayImage, Luma};

/// Encode text at error correction level M
///
/// # Errors
/// [`QrError::EmptyInput`] for empty text, [`QrError::CapacityExceeded`] when
/// the text does not fit version 40.
pub fn encode(text: &str) -> Result<QrCode> {
    encode_with(text, &EncodeOptions::default())
}

/// Encode text with explicit options
pub fn encode_with(text: &str, options: &EncodeOptions) -> Result<QrCode> {
    encoder::encode_text(text, options)
}

/// Encode caller-built segments
pub fn encode_segments(segments: &[Segment], options: &EncodeOptions) -> Result<QrCode> {
    encoder::encode_segments(segments, options)
}

/// Render a symbol in black on white
///
/// # Arguments
/// * `module_px` - Side of one module in pixels (at least 1)
/// * `quiet_zone_px` - Light border on every side, in pixels
///
/// # Returns
/// Square image of side `size * module_px + 2 * quiet_zone_px`
pub fn render(code: &QrCode, module_px: u32, quiet_zone_px: u32) -> Result<GrayImage> {
    let options = RenderOptions::new(module_px).with_quiet_zone_px(quiet_zone_px);
    render::to_image(code, &options)
}

/// Render a symbol centred in a canvas of at least `width` x `height`
/// pixels, with a four-module quiet zone and the largest integer scale
pub fn render_to_fit(code: &QrCode, width: u32, height: u32) -> Result<GrayImage> {
    render::to_image_fit(
        code,
        width,
        height,
        render::DEFAULT_QUIET_ZONE_MODULES,
        Luma([0]),
        Luma([255]),
    )
}
