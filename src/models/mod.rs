//! Core data structures

/// Module grid with reserved function modules
pub mod grid;
/// Packed bit matrix
pub mod matrix;
/// Version, error correction level, mask and finished symbol
pub mod qr_code;

pub use grid::{Module, ModuleGrid};
pub use matrix::BitMatrix;
pub use qr_code::{EcLevel, MaskPattern, QrCode, Version};
