//! Versioned JSON input documents listing the structures to render into one file.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use x07_contracts::X07SRCGEN_INPUT_SCHEMA_VERSION;

use crate::array::{self, ArrayLayout, Elements};
use crate::bytes::write_byte_array;
use crate::cpmap::{CodePointSet, RangeMap, ValueNameGetter};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::escape::{write_string_as_ascii, IcuUtilityEscaper};
use crate::ranges::{write_cp_map, write_unicode_set};
use crate::syntax::TargetSyntax;
use crate::trie::{CodePointTrie, LegacyTrie};
use crate::trie_emit::{write_cp_trie, write_legacy_trie};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub schema_version: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    CodePointTrie {
        name: String,
        trie: CodePointTrie,
    },
    LegacyTrie {
        name: String,
        trie: LegacyTrie,
    },
    CodePointMap {
        map: RangeMap,
        #[serde(
            default,
            deserialize_with = "de_value_names",
            skip_serializing_if = "Option::is_none"
        )]
        value_names: Option<BTreeMap<u32, String>>,
    },
    UnicodeSet {
        set: CodePointSet,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        width: u32,
        values: Vec<i64>,
        #[serde(default)]
        indent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        postfix: Option<String>,
    },
    ByteArray {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bytes: Option<Vec<u8>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        postfix: Option<String>,
    },
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        utf16: Option<Vec<u16>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        postfix: Option<String>,
    },
    Raw {
        text: String,
    },
}

// Internally tagged items are buffered before decoding, and buffered JSON object keys
// stay strings; parse them here.
fn de_value_names<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<BTreeMap<u32, String>>, D::Error> {
    let Some(raw) = Option::<BTreeMap<String, String>>::deserialize(d)? else {
        return Ok(None);
    };
    let mut names = BTreeMap::new();
    for (key, name) in raw {
        let value = key
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("value_names key {key:?} is not a u32")))?;
        names.insert(value, name);
    }
    Ok(Some(names))
}

fn invalid_input(message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::X7S0200InvalidInput, message)
}

pub fn parse_document(bytes: &[u8]) -> Result<SourceDocument, Diagnostic> {
    let doc: SourceDocument = serde_json::from_slice(bytes)
        .map_err(|e| invalid_input(format!("parse input JSON: {e}")))?;
    if doc.schema_version.trim() != X07SRCGEN_INPUT_SCHEMA_VERSION {
        return Err(Diagnostic::new(
            DiagnosticCode::X7S0201SchemaVersionMismatch,
            format!(
                "expected {X07SRCGEN_INPUT_SCHEMA_VERSION} got {:?}",
                doc.schema_version
            ),
        ));
    }
    Ok(doc)
}

/// Renders every item in order. Warnings go to `diags`; the first error stops rendering.
pub fn render_document<W: fmt::Write + ?Sized>(
    doc: &SourceDocument,
    syntax: TargetSyntax,
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
) -> Result<(), Diagnostic> {
    for (idx, item) in doc.items.iter().enumerate() {
        render_item(item, syntax, out, diags).map_err(|mut d| {
            d.message = format!("items[{idx}]: {}", d.message);
            d
        })?;
    }
    Ok(())
}

fn render_item<W: fmt::Write + ?Sized>(
    item: &Item,
    syntax: TargetSyntax,
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
) -> Result<(), Diagnostic> {
    match item {
        Item::CodePointTrie { name, trie } => write_cp_trie(out, diags, name, trie, syntax),
        Item::LegacyTrie { name, trie } => write_legacy_trie(out, name, trie, syntax),
        Item::CodePointMap { map, value_names } => write_cp_map(
            out,
            map,
            value_names.as_ref().map(|n| n as &dyn ValueNameGetter),
            syntax,
        ),
        Item::UnicodeSet { set } => write_unicode_set(out, set, syntax, &IcuUtilityEscaper),
        Item::Array {
            prefix,
            width,
            values,
            indent,
            postfix,
        } => {
            let layout = ArrayLayout {
                prefix: prefix.as_deref(),
                indent,
                postfix: postfix.as_deref(),
            };
            render_array(out, diags, *width, values, &layout)
        }
        Item::ByteArray {
            prefix,
            bytes,
            text,
            postfix,
        } => {
            let bytes: &[u8] = match (bytes, text) {
                (Some(b), None) => b,
                (None, Some(t)) => t.as_bytes(),
                _ => return Err(invalid_input("byte_array needs exactly one of bytes, text")),
            };
            write_byte_array(out, prefix.as_deref(), bytes, postfix.as_deref())
        }
        Item::String {
            prefix,
            utf16,
            text,
            postfix,
        } => {
            let units: Vec<u16> = match (utf16, text) {
                (Some(u), None) => u.clone(),
                (None, Some(t)) => t.encode_utf16().collect(),
                _ => return Err(invalid_input("string needs exactly one of utf16, text")),
            };
            if let Some(prefix) = prefix {
                out.write_str(prefix)?;
            }
            write_string_as_ascii(out, &units, &IcuUtilityEscaper)?;
            if let Some(postfix) = postfix {
                out.write_str(postfix)?;
            }
            Ok(())
        }
        Item::Raw { text } => {
            out.write_str(text)?;
            Ok(())
        }
    }
}

fn narrow<T: TryFrom<i64>>(width: u32, values: &[i64]) -> Result<Vec<T>, Diagnostic> {
    values
        .iter()
        .map(|&v| {
            T::try_from(v)
                .map_err(|_| invalid_input(format!("value {v} does not fit in {width} bits")))
        })
        .collect()
}

fn render_array<W: fmt::Write + ?Sized>(
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
    width: u32,
    values: &[i64],
    layout: &ArrayLayout<'_>,
) -> Result<(), Diagnostic> {
    match width {
        8 => {
            let xs: Vec<u8> = narrow(width, values)?;
            array::write_array(out, diags, width, Elements::U8(&xs), layout)
        }
        16 => {
            let xs: Vec<u16> = narrow(width, values)?;
            array::write_array(out, diags, width, Elements::U16(&xs), layout)
        }
        32 => {
            let xs: Vec<u32> = narrow(width, values)?;
            array::write_array(out, diags, width, Elements::U32(&xs), layout)
        }
        _ => array::write_array(out, diags, width, Elements::I64(values), layout),
    }
}
