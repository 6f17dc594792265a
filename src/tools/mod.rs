//! Helpers shared by the binaries: PNG persistence, module statistics and
//! tracing setup.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::Result;
use crate::models::QrCode;

/// Append `.png` unless the path already ends in it (any case).
pub fn with_png_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let has_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if has_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Write `image` as PNG, creating missing parent directories.
///
/// Returns the path that was written.
pub fn save_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(&path, image::ImageFormat::Png)?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "saved QR code image"
    );
    Ok(path)
}

/// Summary statistics for a symbol's modules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleStats {
    /// Count of dark modules.
    pub dark_modules: usize,
    /// Total modules in the symbol.
    pub total_modules: usize,
    /// Ratio of dark modules to total modules.
    pub dark_ratio: f64,
}

/// Compute dark module stats for a symbol.
pub fn module_stats(code: &QrCode) -> ModuleStats {
    let dark = code.grid().dark_count();
    let total = code.size() * code.size();
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    ModuleStats {
        dark_modules: dark,
        total_modules: total,
        dark_ratio: ratio,
    }
}

/// Initialize the tracing subscriber for the binaries.
///
/// Logs go to stderr. `RUST_LOG` overrides the default level, which is WARN,
/// or DEBUG when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;

    #[test]
    fn test_png_extension() {
        assert_eq!(with_png_extension("out"), PathBuf::from("out.png"));
        assert_eq!(with_png_extension("out.png"), PathBuf::from("out.png"));
        assert_eq!(with_png_extension("OUT.PNG"), PathBuf::from("OUT.PNG"));
        assert_eq!(with_png_extension("out.jpg"), PathBuf::from("out.jpg.png"));
        assert_eq!(
            with_png_extension("dir.v2/code"),
            PathBuf::from("dir.v2/code.png")
        );
    }

    #[test]
    fn test_module_stats() {
        let code = encode("stats").unwrap();
        let stats = module_stats(&code);
        assert_eq!(stats.total_modules, 441);
        assert_eq!(stats.dark_modules, code.grid().dark_count());
        assert!(stats.dark_ratio > 0.3 && stats.dark_ratio < 0.7);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let target = dir.path().join("nested/deeper/code.png");
        let image = GrayImage::new(4, 4);
        let written = save_png(&image, &target).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }
}
