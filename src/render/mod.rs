//! Matrix renderer: grayscale rasters, text art and SVG.

use image::Luma;

use crate::error::{QrError, Result};

/// Grayscale raster output
pub mod raster;
/// SVG output
pub mod svg;
/// Terminal text output
pub mod text;

pub use raster::{to_image, to_image_fit};
pub use svg::{to_svg, to_svg_path};
pub use text::{to_ascii, to_unicode};

/// Quiet zone width recommended for readers, in modules
pub const DEFAULT_QUIET_ZONE_MODULES: u32 = 4;

/// Largest raster, in pixels, any renderer will allocate (16384 x 16384)
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Reject canvases above [`MAX_IMAGE_PIXELS`]
pub(crate) fn check_canvas(width: u32, height: u32) -> Result<()> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_IMAGE_PIXELS {
        return Err(QrError::InvalidParameter(format!(
            "{width}x{height} image exceeds {MAX_IMAGE_PIXELS} pixels"
        )));
    }
    Ok(())
}

/// Raster rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module side
    pub module_px: u32,
    /// Light border around the symbol, in pixels
    pub quiet_zone_px: u32,
    /// Colour of dark modules
    pub dark: Luma<u8>,
    /// Colour of light modules and the quiet zone
    pub light: Luma<u8>,
}

impl RenderOptions {
    /// Black on white with a four-module quiet zone
    pub fn new(module_px: u32) -> Self {
        Self {
            module_px,
            quiet_zone_px: module_px.saturating_mul(DEFAULT_QUIET_ZONE_MODULES),
            dark: Luma([0]),
            light: Luma([255]),
        }
    }

    /// Override the quiet zone width in pixels
    pub fn with_quiet_zone_px(mut self, quiet_zone_px: u32) -> Self {
        self.quiet_zone_px = quiet_zone_px;
        self
    }

    /// Override both colours
    pub fn with_colors(mut self, dark: Luma<u8>, light: Luma<u8>) -> Self {
        self.dark = dark;
        self.light = light;
        self
    }

    /// Side length in pixels for a symbol of `size` modules
    pub fn image_side(&self, size: usize) -> Result<u32> {
        if self.module_px == 0 {
            return Err(QrError::InvalidParameter(
                "module size must be at least one pixel".to_string(),
            ));
        }
        let side = u32::try_from(size)
            .ok()
            .and_then(|s| s.checked_mul(self.module_px))
            .and_then(|s| s.checked_add(self.quiet_zone_px.checked_mul(2)?))
            .ok_or_else(|| QrError::InvalidParameter("rendered image is too large".to_string()))?;
        check_canvas(side, side)?;
        Ok(side)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_side() {
        let options = RenderOptions::new(10).with_quiet_zone_px(40);
        assert_eq!(options.image_side(21).unwrap(), 290);
        assert_eq!(RenderOptions::new(1).image_side(21).unwrap(), 29);
    }

    #[test]
    fn test_zero_module_size_rejected() {
        assert!(matches!(
            RenderOptions::new(0).image_side(21),
            Err(QrError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        let options = RenderOptions::new(u32::MAX / 10);
        assert!(options.image_side(177).is_err());
    }

    #[test]
    fn test_pixel_budget() {
        // 177 * 100_000 fits u32 but not the allocation limit
        let options = RenderOptions::new(100_000).with_quiet_zone_px(0);
        assert!(matches!(
            options.image_side(177),
            Err(QrError::InvalidParameter(_))
        ));
        assert_eq!(RenderOptions::new(80).image_side(177).unwrap(), 177 * 80 + 2 * 320);
        assert!(check_canvas(16384, 16384).is_ok());
        assert!(check_canvas(16385, 16384).is_err());
    }
}
