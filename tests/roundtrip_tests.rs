//! Encode-then-read checks
//!
//! Every symbol produced by the encoder is read back through the module
//! reader, which verifies format information, placement, interleaving and
//! Reed-Solomon parity in one go.

use rust_qrgen::{
    BitMatrix, EcLevel, EncodeOptions, MaskPattern, Mode, Segment, Strategy, Version, encode,
    encode_segments, encode_with, read, read_code,
};

#[test]
fn test_read_back_modes() {
    let cases = [
        ("01234567890123456789", Mode::Numeric),
        ("HTTP://EXAMPLE.COM/ABC", Mode::Alphanumeric),
        ("hello, world", Mode::Byte),
    ];
    for (text, mode) in cases {
        let code = encode(text).unwrap();
        let decoded = read_code(&code).unwrap();
        assert_eq!(decoded.text, text);
        assert_eq!(decoded.modes, vec![mode]);
        assert_eq!(decoded.version, code.version());
        assert_eq!(decoded.ec_level, code.ec_level());
        assert_eq!(decoded.mask, code.mask());
        assert_eq!(decoded.corrected_codewords, 0);
    }
}

#[test]
fn test_read_back_mixed_text() {
    let text = "Order 123456789012 ships to ROOM 42B";
    for strategy in [Strategy::Optimal, Strategy::Runs] {
        let options = EncodeOptions::default().with_strategy(strategy);
        let code = encode_with(text, &options).unwrap();
        assert_eq!(read_code(&code).unwrap().text, text);
    }
}

#[test]
fn test_read_back_utf8_with_eci() {
    let text = "Grüße aus Köln, 東京";
    let options = EncodeOptions::new(EcLevel::Q).with_eci_utf8(true);
    let code = encode_with(text, &options).unwrap();
    let decoded = read_code(&code).unwrap();
    assert_eq!(decoded.text, text);
    assert_eq!(decoded.eci, Some(26));
    assert_eq!(decoded.modes[0], Mode::Eci);

    // Without the header the bytes are still valid UTF-8
    let code = encode(text).unwrap();
    let decoded = read_code(&code).unwrap();
    assert_eq!(decoded.text, text);
    assert_eq!(decoded.eci, None);
}

#[test]
fn test_read_back_every_level_and_mask() {
    for level in EcLevel::ALL {
        for mask in MaskPattern::ALL {
            let options = EncodeOptions::new(level).with_mask(mask);
            let code = encode_with("MASK TEST 0123", &options).unwrap();
            let decoded = read_code(&code).unwrap();
            assert_eq!(decoded.text, "MASK TEST 0123");
            assert_eq!(decoded.ec_level, level);
            assert_eq!(decoded.mask, mask);
        }
    }
}

#[test]
fn test_read_back_large_versions() {
    // Versions 7+ carry version information, 10+ and 27+ widen the counts
    for n in [7u8, 12, 27, 40] {
        let version = Version::new(n).unwrap();
        let options = EncodeOptions::new(EcLevel::M).with_version(version);
        let text = format!("version {n} payload 1234567890 ABCDEF");
        let code = encode_with(&text, &options).unwrap();
        let decoded = read_code(&code).unwrap();
        assert_eq!(decoded.version, version);
        assert_eq!(decoded.text, text);
    }

    let long = "The quick brown fox jumps over the lazy dog. ".repeat(20);
    let code = encode_with(&long, &EncodeOptions::new(EcLevel::H)).unwrap();
    assert!(code.version().number() > 20);
    assert_eq!(read_code(&code).unwrap().text, long);
}

#[test]
fn test_read_back_explicit_segments() {
    let segments = [
        Segment::alphanumeric("ID ").unwrap(),
        Segment::numeric("000042").unwrap(),
        Segment::bytes(b"/x"),
    ];
    let code = encode_segments(&segments, &EncodeOptions::default()).unwrap();
    let decoded = read_code(&code).unwrap();
    assert_eq!(decoded.text, "ID 000042/x");
    assert_eq!(
        decoded.modes,
        vec![Mode::Alphanumeric, Mode::Numeric, Mode::Byte]
    );
}

#[test]
fn test_recovers_damaged_modules() {
    let options = EncodeOptions::new(EcLevel::H).with_version(Version::MIN);
    let code = encode_with("HELLO", &options).unwrap();
    let grid = code.grid();

    let mut damaged: BitMatrix = grid.modules().clone();
    for (x, y) in [(20, 20), (19, 20), (10, 10), (12, 15)] {
        assert!(!grid.is_reserved(x, y));
        damaged.toggle(x, y);
    }

    let decoded = read(&damaged).unwrap();
    assert_eq!(decoded.text, "HELLO");
    assert!(decoded.corrected_codewords >= 1);
    assert!(decoded.corrected_codewords <= 3);
}

#[test]
fn test_rejects_non_symbol_sizes() {
    assert!(read(&BitMatrix::square(22)).is_err());
    assert!(read(&BitMatrix::new(21, 25)).is_err());
}
