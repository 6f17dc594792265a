/// Text renderings for terminals and logs
use crate::models::QrCode;

fn dark_at(code: &QrCode, quiet: usize, x: usize, y: usize) -> bool {
    x >= quiet && y >= quiet && code.is_dark(x - quiet, y - quiet)
}

/// Two characters per module: `##` dark, two spaces light
pub fn to_ascii(code: &QrCode, quiet_modules: usize) -> String {
    let side = code.size() + 2 * quiet_modules;
    let mut out = String::with_capacity(side * (side * 2 + 1));
    for y in 0..side {
        for x in 0..side {
            out.push_str(if dark_at(code, quiet_modules, x, y) { "##" } else { "  " });
        }
        out.push('\n');
    }
    out
}

/// Half-block characters, two module rows per line, dark modules filled
pub fn to_unicode(code: &QrCode, quiet_modules: usize) -> String {
    let side = code.size() + 2 * quiet_modules;
    let mut out = String::new();
    for y in (0..side).step_by(2) {
        for x in 0..side {
            let top = dark_at(code, quiet_modules, x, y);
            let bottom = y + 1 < side && dark_at(code, quiet_modules, x, y + 1);
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    out
}
