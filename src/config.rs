//! Environment-driven defaults, read once per process.
//!
//! Unparseable values fall back to the built-in default.

use std::sync::OnceLock;

use crate::models::EcLevel;

/// File written by `qrgen` when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "qrcode.png";

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_ec_level(name: &str, default: EcLevel) -> EcLevel {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<EcLevel>().ok())
        .unwrap_or(default)
}

static DEFAULT_EC_LEVEL: OnceLock<EcLevel> = OnceLock::new();

/// `QR_DEFAULT_ECC` (L, M, Q or H; default M)
pub fn default_ec_level() -> EcLevel {
    *DEFAULT_EC_LEVEL.get_or_init(|| parse_env_ec_level("QR_DEFAULT_ECC", EcLevel::M))
}

static OUTPUT_SIZE: OnceLock<u32> = OnceLock::new();

/// `QR_OUTPUT_SIZE`: side of the CLI image in pixels (default 500)
pub fn output_size() -> u32 {
    *OUTPUT_SIZE.get_or_init(|| parse_env_u32("QR_OUTPUT_SIZE", 500).clamp(1, 16384))
}

static PREVIEW_SIZE: OnceLock<u32> = OnceLock::new();

/// `QR_PREVIEW_SIZE`: side of the preview image in pixels (default 300)
pub fn preview_size() -> u32 {
    *PREVIEW_SIZE.get_or_init(|| parse_env_u32("QR_PREVIEW_SIZE", 300).clamp(1, 16384))
}

static QUIET_ZONE_MODULES: OnceLock<u32> = OnceLock::new();

/// `QR_QUIET_ZONE`: quiet zone width in modules (default 4)
pub fn quiet_zone_modules() -> u32 {
    *QUIET_ZONE_MODULES.get_or_init(|| parse_env_u32("QR_QUIET_ZONE", 4).min(64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variables_use_defaults() {
        assert_eq!(parse_env_u32("QR_TEST_SURELY_UNSET_VARIABLE", 7), 7);
        assert_eq!(
            parse_env_ec_level("QR_TEST_SURELY_UNSET_VARIABLE", EcLevel::Q),
            EcLevel::Q
        );
    }

    #[test]
    fn test_getters_are_stable() {
        assert_eq!(output_size(), output_size());
        assert!(quiet_zone_modules() <= 64);
        assert!(preview_size() >= 1);
    }
}
