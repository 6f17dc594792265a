use image::{GrayImage, Luma};
use rayon::prelude::*;

use super::{RenderOptions, check_canvas};
use crate::error::{QrError, Result};
use crate::models::QrCode;

/// Render each module as a `module_px` square inside the quiet zone
pub fn to_image(code: &QrCode, options: &RenderOptions) -> Result<GrayImage> {
    let side = options.image_side(code.size())?;
    let quiet = options.quiet_zone_px as usize;
    let scale = options.module_px as usize;
    Ok(paint(code, side, side, quiet, quiet, scale, options.dark, options.light))
}

/// Fit the symbol into a `width` x `height` canvas.
///
/// The output is at least `size + 2 * quiet_modules` modules wide, the scale
/// is the largest integer that fits both axes and the symbol is centred.
pub fn to_image_fit(
    code: &QrCode,
    width: u32,
    height: u32,
    quiet_modules: u32,
    dark: Luma<u8>,
    light: Luma<u8>,
) -> Result<GrayImage> {
    let input = code.size() as u32;
    let qr_width = quiet_modules
        .checked_mul(2)
        .and_then(|q| q.checked_add(input))
        .ok_or_else(|| QrError::InvalidParameter("quiet zone is too large".to_string()))?;
    let out_w = width.max(qr_width);
    let out_h = height.max(qr_width);
    check_canvas(out_w, out_h)?;
    let multiple = (out_w / qr_width).min(out_h / qr_width);
    let left = (out_w - input * multiple) / 2;
    let top = (out_h - input * multiple) / 2;
    Ok(paint(
        code,
        out_w,
        out_h,
        left as usize,
        top as usize,
        multiple as usize,
        dark,
        light,
    ))
}

#[allow(clippy::too_many_arguments)]
fn paint(
    code: &QrCode,
    width: u32,
    height: u32,
    left: usize,
    top: usize,
    scale: usize,
    dark: Luma<u8>,
    light: Luma<u8>,
) -> GrayImage {
    let row_len = width as usize;
    let mut pixels = vec![light.0[0]; row_len * height as usize];
    let extent = code.size() * scale;

    // Process rows in parallel
    pixels.par_chunks_mut(row_len).enumerate().for_each(|(py, row)| {
        if py < top || py >= top + extent {
            return;
        }
        let y = (py - top) / scale;
        for x in 0..code.size() {
            if code.is_dark(x, y) {
                let start = left + x * scale;
                row[start..start + scale].fill(dark.0[0]);
            }
        }
    });

    GrayImage::from_raw(width, height, pixels).unwrap_or_else(|| GrayImage::new(width, height))
}
