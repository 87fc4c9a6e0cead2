use serde_json::json;
use x07_contracts::X07SRCGEN_INPUT_SCHEMA_VERSION;
use x07srcgen_core::diagnostics::{Diagnostic, DiagnosticCode};
use x07srcgen_core::document::{parse_document, render_document, Item, SourceDocument};
use x07srcgen_core::TargetSyntax;

fn doc(items: serde_json::Value) -> SourceDocument {
    let bytes = serde_json::to_vec(&json!({
        "schema_version": X07SRCGEN_INPUT_SCHEMA_VERSION,
        "items": items,
    }))
    .expect("encode");
    parse_document(&bytes).expect("parse_document")
}

fn render(doc: &SourceDocument, syntax: TargetSyntax) -> Result<(String, Vec<Diagnostic>), Diagnostic> {
    let mut out = String::new();
    let mut diags = Vec::new();
    render_document(doc, syntax, &mut out, &mut diags)?;
    Ok((out, diags))
}

#[test]
fn items_render_in_order() {
    let d = doc(json!([
        {"kind": "raw", "text": "#include \"a.h\"\n\n"},
        {"kind": "array", "prefix": "static const uint8_t x[{len}]={\n", "width": 8,
         "values": [1, 200], "postfix": "\n};\n"},
        {"kind": "byte_array", "prefix": "static const char n[{len}]={\n", "text": "Lu\0",
         "postfix": "\n};\n"},
        {"kind": "string", "prefix": "const char *s=", "text": "café", "postfix": ";\n"},
    ]));
    let (out, diags) = render(&d, TargetSyntax::CCode).expect("render");
    assert_eq!(
        out,
        "#include \"a.h\"\n\n\
         static const uint8_t x[2]={\n1,0xc8\n};\n\
         static const char n[3]={\n'L','u',0\n};\n\
         const char *s=\"caf\\u00E9\";\n"
    );
    assert!(diags.is_empty());
}

#[test]
fn code_point_trie_item() {
    let d = doc(json!([{
        "kind": "code_point_trie",
        "name": "gc",
        "trie": {
            "index": [0, 1], "data": {"bits8": [5, 6, 7]},
            "index_length": 2, "data_length": 3,
            "high_start": 0x800, "shifted12_high_start": 1,
            "trie_type": "small", "value_width": 2,
            "index3_null_offset": 0x7fff, "data_null_offset": 0, "null_value": 0
        }
    }]));
    let (out, _) = render(&d, TargetSyntax::Toml).expect("render");
    assert!(out.starts_with("index = [\n  0,1\n]\ndata_8 = [\n  5,6,7\n]\n"), "{out}");
    assert!(out.contains("type = 1\nvalueWidth = 2\n"), "{out}");
}

#[test]
fn map_and_set_items_render_as_toml() {
    let d = doc(json!([
        {"kind": "code_point_map",
         "map": {"default_value": 0, "ranges": [{"start": 0x41, "end": 0x5a, "value": 1}]},
         "value_names": {"0": "no", "1": "yes"}},
        {"kind": "unicode_set", "set": {"ranges": [[0x61, 0x7a]], "strings": ["ch"]}},
    ]));
    let (out, _) = render(&d, TargetSyntax::Toml).expect("render");
    assert!(out.contains("  {a=0x41, b=0x5a, v=1, name=\"yes\"},\n"), "{out}");
    assert!(out.contains("  [0x61, 0x7a],\n]\nstrings = [\n  \"ch\",\n]\n"), "{out}");
}

#[test]
fn overlapping_map_ranges_are_rejected_on_parse() {
    let bytes = serde_json::to_vec(&json!({
        "schema_version": X07SRCGEN_INPUT_SCHEMA_VERSION,
        "items": [{"kind": "code_point_map", "map": {"ranges": [
            {"start": 0, "end": 10, "value": 1},
            {"start": 5, "end": 20, "value": 2}
        ]}}],
    }))
    .expect("encode");
    let err = parse_document(&bytes).expect_err("overlap");
    assert_eq!(err.code, DiagnosticCode::X7S0200InvalidInput);
}

#[test]
fn invalid_set_ranges_are_rejected_on_parse() {
    for ranges in [json!([[0x100, 0xff]]), json!([[0x110000, 0x110010]]), json!([[0x41, 0x110000]])] {
        let bytes = serde_json::to_vec(&json!({
            "schema_version": X07SRCGEN_INPUT_SCHEMA_VERSION,
            "items": [{"kind": "unicode_set", "set": {"ranges": ranges}}],
        }))
        .expect("encode");
        let err = parse_document(&bytes).expect_err("invalid set range");
        assert_eq!(err.code, DiagnosticCode::X7S0200InvalidInput);
        assert!(err.message.contains("invalid set range"), "{}", err.message);
    }
}

#[test]
fn schema_version_must_match() {
    let bytes = br#"{"schema_version":"x07srcgen.input@9.9.9","items":[]}"#;
    let err = parse_document(bytes).expect_err("mismatch");
    assert_eq!(err.code, DiagnosticCode::X7S0201SchemaVersionMismatch);
}

#[test]
fn malformed_json_is_invalid_input() {
    let err = parse_document(b"{not json").expect_err("bad json");
    assert_eq!(err.code, DiagnosticCode::X7S0200InvalidInput);
}

#[test]
fn errors_name_the_failing_item() {
    let d = doc(json!([
        {"kind": "raw", "text": "x"},
        {"kind": "array", "width": 8, "values": [256]},
    ]));
    let err = render(&d, TargetSyntax::CCode).expect_err("256 is not a byte");
    assert_eq!(err.code, DiagnosticCode::X7S0200InvalidInput);
    assert!(err.message.starts_with("items[1]: "), "{}", err.message);
}

#[test]
fn byte_array_needs_exactly_one_source() {
    let d = doc(json!([{"kind": "byte_array", "bytes": [1], "text": "a"}]));
    let err = render(&d, TargetSyntax::CCode).expect_err("two sources");
    assert_eq!(err.code, DiagnosticCode::X7S0200InvalidInput);
}

#[test]
fn unrecognized_array_width_is_a_warning() {
    let d = doc(json!([
        {"kind": "array", "prefix": "a[{len}]={", "width": 12, "values": [1], "postfix": "};"},
        {"kind": "raw", "text": "end\n"},
    ]));
    let (out, diags) = render(&d, TargetSyntax::CCode).expect("render");
    assert_eq!(out, "end\n");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::X7S0100UnrecognizedWidth);
}

#[test]
fn sixty_four_bit_array_keeps_negative_values() {
    let d = doc(json!([{"kind": "array", "width": 64, "values": [-2, 16]}]));
    let (out, _) = render(&d, TargetSyntax::CCode).expect("render");
    assert_eq!(out, "-2,0x10");
}

#[test]
fn documents_round_trip_through_serde() {
    let d = doc(json!([
        {"kind": "unicode_set", "set": {"ranges": [[1, 2]], "strings": []}},
        {"kind": "string", "utf16": [0xd83d, 0xde00]},
    ]));
    let text = serde_json::to_string(&d).expect("encode");
    let back = parse_document(text.as_bytes()).expect("decode");
    assert_eq!(back, d);
    assert!(matches!(back.items[1], Item::String { .. }));
}
