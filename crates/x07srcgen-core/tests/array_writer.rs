use x07srcgen_core::array::{write_array, write_elements, ArrayLayout, Elements, VALUES_PER_LINE};
use x07srcgen_core::diagnostics::{Diagnostic, DiagnosticCode};

fn render(elements: Elements<'_>, layout: &ArrayLayout<'_>) -> String {
    let mut out = String::new();
    write_elements(&mut out, elements, layout).expect("write_elements");
    out
}

fn parse_values(body: &str) -> Vec<i64> {
    body.split(',')
        .map(|tok| tok.trim())
        .map(|tok| match tok.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16).expect("hex literal"),
            None => tok.parse::<i64>().expect("decimal literal"),
        })
        .collect()
}

#[test]
fn prefix_receives_element_count() {
    let layout = ArrayLayout {
        prefix: Some("static const uint16_t t[{len}]={\n"),
        indent: "",
        postfix: Some("\n};\n"),
    };
    let out = render(Elements::U16(&[0, 5, 9, 10, 0xffff]), &layout);
    assert_eq!(
        out,
        "static const uint16_t t[5]={\n0,5,9,0xa,0xffff\n};\n"
    );
}

#[test]
fn wraps_after_every_sixteen_values_with_indent() {
    let values = [1u8; 33];
    let layout = ArrayLayout {
        prefix: None,
        indent: "  ",
        postfix: None,
    };
    let out = render(Elements::U8(&values), &layout);
    let line = vec!["1"; VALUES_PER_LINE].join(",");
    assert_eq!(out, format!("{line},\n  {line},\n  1"));
}

#[test]
fn empty_array_is_prefix_and_postfix_only() {
    let layout = ArrayLayout {
        prefix: Some("x[{len}]={"),
        indent: "",
        postfix: Some("};"),
    };
    assert_eq!(render(Elements::U32(&[]), &layout), "x[0]={};");
}

#[test]
fn sixty_four_bit_values_are_signed() {
    let out = render(
        Elements::I64(&[-1, 9, 10, i64::MIN, i64::MAX]),
        &ArrayLayout::default(),
    );
    assert_eq!(
        out,
        "-1,9,0xa,-9223372036854775808,0x7fffffffffffffff"
    );
}

#[test]
fn literals_decode_back_to_the_input() {
    let u8s: Vec<u8> = (0..=255).collect();
    let u16s: Vec<u16> = (0..100u16).map(|i| i.wrapping_mul(2654)).collect();
    let u32s: Vec<u32> = (0..100u32).map(|i| i.wrapping_mul(2_654_435_761)).collect();
    let i64s: Vec<i64> = (-50..50i64).map(|i| i * 1_000_000_007).collect();

    let layout = ArrayLayout {
        prefix: None,
        indent: "    ",
        postfix: None,
    };
    let cases: Vec<(Elements<'_>, Vec<i64>)> = vec![
        (Elements::U8(&u8s), u8s.iter().map(|&v| i64::from(v)).collect()),
        (Elements::U16(&u16s), u16s.iter().map(|&v| i64::from(v)).collect()),
        (Elements::U32(&u32s), u32s.iter().map(|&v| i64::from(v)).collect()),
        (Elements::I64(&i64s), i64s.clone()),
    ];
    for (elements, expected) in cases {
        let out = render(elements, &layout);
        assert_eq!(parse_values(&out), expected, "width {}", elements.bits());
        for line in out.lines() {
            let n = line.split(',').filter(|t| !t.trim().is_empty()).count();
            assert!(n <= VALUES_PER_LINE, "line too long: {line:?}");
        }
    }
}

#[test]
fn unrecognized_width_writes_nothing_and_warns() {
    let mut out = String::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let layout = ArrayLayout {
        prefix: Some("never[{len}]={"),
        indent: "",
        postfix: Some("};"),
    };
    write_array(&mut out, &mut diags, 12, Elements::U16(&[1, 2]), &layout)
        .expect("unrecognized width is not fatal");
    assert_eq!(out, "");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::X7S0100UnrecognizedWidth);
    assert!(!diags[0].is_error());
}

#[test]
fn width_must_match_elements() {
    let mut out = String::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let err = write_array(
        &mut out,
        &mut diags,
        16,
        Elements::U32(&[1, 2]),
        &ArrayLayout::default(),
    )
    .expect_err("mismatch must fail");
    assert_eq!(err.code, DiagnosticCode::X7S0102WidthMismatch);
    assert_eq!(out, "");
    assert!(diags.is_empty());
}

#[test]
fn recognized_width_writes_like_write_elements() {
    let mut out = String::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    write_array(
        &mut out,
        &mut diags,
        8,
        Elements::U8(&[7, 200]),
        &ArrayLayout::default(),
    )
    .expect("write_array");
    assert_eq!(out, "7,0xc8");
    assert!(diags.is_empty());
}
