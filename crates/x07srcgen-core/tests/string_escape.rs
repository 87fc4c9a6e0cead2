use x07srcgen_core::diagnostics::DiagnosticCode;
use x07srcgen_core::escape::{write_string_as_ascii, IcuUtilityEscaper, Printability};

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn render(units: &[u16]) -> String {
    let mut out = String::new();
    write_string_as_ascii(&mut out, units, &IcuUtilityEscaper).expect("write_string_as_ascii");
    out
}

#[test]
fn quotes_are_escaped_and_controls_use_u_escapes() {
    assert_eq!(render(&utf16("a\"b\u{1}c")), "\"a\\\"b\\u0001c\"");
}

#[test]
fn empty_string_is_two_quotes() {
    assert_eq!(render(&[]), "\"\"");
}

#[test]
fn non_ascii_and_supplementary_code_points_are_escaped() {
    assert_eq!(render(&utf16("é")), "\"\\u00E9\"");
    assert_eq!(render(&utf16("x\u{1F600}y")), "\"x\\U0001F600y\"");
}

#[test]
fn unpaired_surrogate_is_escaped_as_itself() {
    assert_eq!(render(&[0x61, 0xd800, 0x62]), "\"a\\uD800b\"");
}

#[test]
fn output_is_always_seven_bit() {
    let out = render(&utf16("Ωmega \u{7f} \u{10FFFF} \\ ok"));
    assert!(out.is_ascii(), "{out:?}");
    assert!(out.starts_with('"') && out.ends_with('"'));
}

/// Treats everything as printable, so non-ASCII text reaches the writer unescaped.
struct PrintsEverything;

impl Printability for PrintsEverything {
    fn is_unprintable(&self, _cp: u32) -> bool {
        false
    }

    fn escape(&self, _cp: u32) -> Vec<u16> {
        Vec::new()
    }
}

#[test]
fn printable_non_ascii_is_rejected() {
    let mut out = String::new();
    let err = write_string_as_ascii(&mut out, &utf16("aé"), &PrintsEverything)
        .expect_err("non-ASCII must not pass through");
    assert_eq!(err.code, DiagnosticCode::X7S0130UnescapedNonAscii);
}

/// Escapes every code point with a non-ASCII marker.
struct BadEscapes;

impl Printability for BadEscapes {
    fn is_unprintable(&self, _cp: u32) -> bool {
        true
    }

    fn escape(&self, _cp: u32) -> Vec<u16> {
        "§".encode_utf16().collect()
    }
}

#[test]
fn non_ascii_escape_sequences_are_rejected() {
    let mut out = String::new();
    let err = write_string_as_ascii(&mut out, &utf16("a"), &BadEscapes)
        .expect_err("escape must be 7-bit");
    assert_eq!(err.code, DiagnosticCode::X7S0130UnescapedNonAscii);
}
