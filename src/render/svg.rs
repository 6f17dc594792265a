use std::fmt::Write;

use crate::models::QrCode;

/// Path data with one unit square per dark module, offset by the quiet zone
pub fn to_svg_path(code: &QrCode, quiet_modules: usize) -> String {
    let mut path = String::new();
    for y in 0..code.size() {
        for x in 0..code.size() {
            if code.is_dark(x, y) {
                if !path.is_empty() {
                    path.push(' ');
                }
                let _ = write!(path, "M{},{}h1v1h-1z", x + quiet_modules, y + quiet_modules);
            }
        }
    }
    path
}

/// Complete SVG document in module units
pub fn to_svg(code: &QrCode, quiet_modules: usize, dark: &str, light: &str) -> String {
    let side = code.size() + 2 * quiet_modules;
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
            "viewBox=\"0 0 {side} {side}\" stroke=\"none\">\n",
            "\t<rect width=\"100%\" height=\"100%\" fill=\"{light}\"/>\n",
            "\t<path d=\"{path}\" fill=\"{dark}\"/>\n",
            "</svg>\n"
        ),
        side = side,
        light = light,
        dark = dark,
        path = to_svg_path(code, quiet_modules),
    )
}
