//! Trie serialization: index/data arrays followed by the metadata struct.
//!
//! The struct field order is positional and must match the consumers' struct
//! definitions (`UTrie2` and `UCPTrie`).

use std::fmt;

use crate::array::{self, ArrayLayout, Elements};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::syntax::TargetSyntax;
use crate::trie::{value_width_bits, CodePointTrie, LegacyTrie, LegacyTrieData, ValueWidth};

fn length_out_of_range(what: &str, declared: u32, actual: usize) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::X7S0103LengthOutOfRange,
        format!("{what} length {declared} exceeds array of {actual} elements"),
    )
}

fn head<'a>(what: &str, elements: Elements<'a>, declared: u32) -> Result<Elements<'a>, Diagnostic> {
    let actual = elements.len();
    elements
        .head(declared as usize)
        .ok_or_else(|| length_out_of_range(what, declared, actual))
}

/// Writes the arrays of a legacy trie.
///
/// A 16-bit trie is one array of `index_length + data_length` words (index followed
/// by data); a 32-bit trie is a 16-bit index array and a separate 32-bit data array.
pub fn write_legacy_trie_arrays<W: fmt::Write + ?Sized>(
    out: &mut W,
    index_prefix: Option<&str>,
    data32_prefix: Option<&str>,
    trie: &LegacyTrie,
    postfix: Option<&str>,
) -> Result<(), Diagnostic> {
    let index = head("index", Elements::U16(&trie.index), trie.index_length)?;
    let index_layout = ArrayLayout {
        prefix: index_prefix,
        indent: "",
        postfix,
    };
    match &trie.data {
        LegacyTrieData::Bits16(data16) => {
            let data = head("data16", Elements::U16(data16), trie.data_length)?;
            array::write_values(
                out,
                &index_layout,
                index.len() + data.len(),
                index.values().chain(data.values()),
            )?;
        }
        LegacyTrieData::Bits32(data32) => {
            let data = head("data32", Elements::U32(data32), trie.data_length)?;
            array::write_elements(out, index, &index_layout)?;
            let data_layout = ArrayLayout {
                prefix: data32_prefix,
                indent: "",
                postfix,
            };
            array::write_elements(out, data, &data_layout)?;
        }
    }
    Ok(())
}

/// Writes the positional `UTrie2` initializer referencing the arrays by name.
pub fn write_legacy_trie_struct<W: fmt::Write + ?Sized>(
    out: &mut W,
    prefix: Option<&str>,
    trie: &LegacyTrie,
    index_name: &str,
    data32_name: &str,
    postfix: Option<&str>,
) -> Result<(), Diagnostic> {
    if let Some(prefix) = prefix {
        out.write_str(prefix)?;
    }
    match &trie.data {
        LegacyTrieData::Bits16(_) => write!(
            out,
            "    {index_name},\n    {index_name}+{},\n    nullptr,\n",
            trie.index_length
        )?,
        LegacyTrieData::Bits32(_) => write!(
            out,
            "    {index_name},\n    nullptr,\n    {data32_name},\n"
        )?,
    }
    write!(
        out,
        "    {},\n    {},\n    {:#x},\n    {:#x},\n    {:#x},\n    {:#x},\n    {:#x},\n    {:#x},\n",
        trie.index_length,
        trie.data_length,
        trie.index2_null_offset,
        trie.data_null_offset,
        trie.initial_value,
        trie.error_value,
        trie.high_start,
        trie.high_value_index,
    )?;
    out.write_str("    nullptr, 0, false, false, 0, nullptr\n")?;
    if let Some(postfix) = postfix {
        out.write_str(postfix)?;
    }
    Ok(())
}

/// Writes a legacy trie as `<name>_trieIndex`, optional `<name>_trieData` and
/// `<name>_trie`. Only C source has a legacy trie struct.
pub fn write_legacy_trie<W: fmt::Write + ?Sized>(
    out: &mut W,
    name: &str,
    trie: &LegacyTrie,
    syntax: TargetSyntax,
) -> Result<(), Diagnostic> {
    if syntax != TargetSyntax::CCode {
        return Err(Diagnostic::new(
            DiagnosticCode::X7S0110UnsupportedSyntax,
            format!("legacy trie {name:?} cannot be written as {syntax}"),
        ));
    }
    let index_prefix = format!("static const uint16_t {name}_trieIndex[{{len}}]={{\n");
    let data_prefix = format!("static const uint32_t {name}_trieData[{{len}}]={{\n");
    write_legacy_trie_arrays(
        out,
        Some(&index_prefix),
        Some(&data_prefix),
        trie,
        Some("\n};\n\n"),
    )?;
    let struct_prefix = format!("static const UTrie2 {name}_trie={{\n");
    write_legacy_trie_struct(
        out,
        Some(&struct_prefix),
        trie,
        &format!("{name}_trieIndex"),
        &format!("{name}_trieData"),
        Some("};\n\n"),
    )
}

/// Writes the index and data arrays of a code point trie.
///
/// The data element width comes from the value width tag. An unrecognized tag pushes
/// a warning and skips the data array; the index array is still written.
pub fn write_cp_trie_arrays<W: fmt::Write + ?Sized>(
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
    index_prefix: Option<&str>,
    data_prefix: Option<&str>,
    trie: &CodePointTrie,
    postfix: Option<&str>,
    syntax: TargetSyntax,
) -> Result<(), Diagnostic> {
    let indent = syntax.rules().array_indent();
    let index = head("index", Elements::U16(&trie.index), trie.index_length)?;
    array::write_elements(
        out,
        index,
        &ArrayLayout {
            prefix: index_prefix,
            indent,
            postfix,
        },
    )?;

    if trie.value_width().is_none() {
        diags.push(Diagnostic::new(
            DiagnosticCode::X7S0101UnrecognizedValueWidth,
            format!(
                "value width tag {} is not 0, 1 or 2; data array skipped",
                trie.value_width
            ),
        ));
        return Ok(());
    }
    let data = head("data", trie.data.elements(), trie.data_length)?;
    array::write_array(
        out,
        diags,
        value_width_bits(trie.value_width),
        data,
        &ArrayLayout {
            prefix: data_prefix,
            indent,
            postfix,
        },
    )
}

/// Writes the code point trie metadata struct.
///
/// C source gets `index_name`/`data_name` references ahead of the fields; TOML gets
/// `key = value` lines only.
pub fn write_cp_trie_struct<W: fmt::Write + ?Sized>(
    out: &mut W,
    prefix: Option<&str>,
    trie: &CodePointTrie,
    index_name: &str,
    data_name: &str,
    postfix: Option<&str>,
    syntax: TargetSyntax,
) -> Result<(), Diagnostic> {
    let rules = syntax.rules();
    let mut buf = String::new();
    if let Some(prefix) = prefix {
        buf.push_str(prefix);
    }
    rules.write_cp_trie_refs(&mut buf, index_name, data_name)?;
    rules.write_cp_trie_fields(&mut buf, trie)?;
    if let Some(postfix) = postfix {
        buf.push_str(postfix);
    }
    out.write_str(&buf)?;
    Ok(())
}

/// Writes a complete code point trie: both arrays, then the struct.
pub fn write_cp_trie<W: fmt::Write + ?Sized>(
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
    name: &str,
    trie: &CodePointTrie,
    syntax: TargetSyntax,
) -> Result<(), Diagnostic> {
    let rules = syntax.rules();
    let bits = trie.value_width().map_or(0, ValueWidth::bits);
    let index_prefix = rules.cp_trie_index_prefix(name);
    let data_prefix = rules.cp_trie_data_prefix(name, bits);
    write_cp_trie_arrays(
        out,
        diags,
        Some(&index_prefix),
        Some(&data_prefix),
        trie,
        Some(rules.array_postfix()),
        syntax,
    )?;

    let frame = rules.cp_trie_struct_frame(name);
    write_cp_trie_struct(
        out,
        frame.prefix.as_deref(),
        trie,
        &frame.index_name,
        &frame.data_name,
        frame.postfix.as_deref(),
        syntax,
    )
}
