//! Target syntaxes for generated sources.
//!
//! Two syntaxes exist: C source (`//` comments, `static const` arrays and struct
//! initializers) and TOML data (`#` comments, `key = value` lines and inline arrays).
//! Per-syntax text shapes are provided by [`SyntaxRules`], selected by
//! [`TargetSyntax::rules`].

use std::fmt;

use crate::trie::CodePointTrie;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetSyntax {
    #[default]
    CCode,
    Toml,
}

impl TargetSyntax {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetSyntax::CCode => "c",
            TargetSyntax::Toml => "toml",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "c" | "ccode" => Some(TargetSyntax::CCode),
            "toml" => Some(TargetSyntax::Toml),
            _ => None,
        }
    }

    /// Infers the syntax from an output file name extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext {
            "h" | "c" | "cpp" | "inc" => Some(TargetSyntax::CCode),
            "toml" => Some(TargetSyntax::Toml),
            _ => None,
        }
    }

    pub fn comment_prefix(self) -> &'static str {
        match self {
            TargetSyntax::CCode => "//",
            TargetSyntax::Toml => "#",
        }
    }

    pub(crate) fn rules(self) -> &'static dyn SyntaxRules {
        match self {
            TargetSyntax::CCode => &CCodeRules,
            TargetSyntax::Toml => &TomlRules,
        }
    }
}

impl fmt::Display for TargetSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for TargetSyntax {
    fn value_variants<'a>() -> &'a [Self] {
        const ALL: [TargetSyntax; 2] = [TargetSyntax::CCode, TargetSyntax::Toml];
        &ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            TargetSyntax::CCode => Some(clap::builder::PossibleValue::new("c").alias("ccode")),
            TargetSyntax::Toml => Some(clap::builder::PossibleValue::new("toml")),
        }
    }
}

/// Prefix, separator names and postfix around a code point trie struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StructFrame {
    pub prefix: Option<String>,
    pub index_name: String,
    pub data_name: String,
    pub postfix: Option<String>,
}

/// Text shapes of one target syntax. Array prefixes are `{len}` templates.
pub(crate) trait SyntaxRules {
    /// Continuation indent for wrapped array lines.
    fn array_indent(&self) -> &'static str;

    fn cp_trie_index_prefix(&self, name: &str) -> String;

    fn cp_trie_data_prefix(&self, name: &str, bits: u32) -> String;

    fn array_postfix(&self) -> &'static str;

    fn cp_trie_struct_frame(&self, name: &str) -> StructFrame;

    /// Array references at the head of the struct; nothing for syntaxes that name arrays
    /// by convention.
    fn write_cp_trie_refs(
        &self,
        out: &mut dyn fmt::Write,
        index_name: &str,
        data_name: &str,
    ) -> fmt::Result;

    fn write_cp_trie_fields(&self, out: &mut dyn fmt::Write, trie: &CodePointTrie) -> fmt::Result;
}

struct CCodeRules;

impl SyntaxRules for CCodeRules {
    fn array_indent(&self) -> &'static str {
        ""
    }

    fn cp_trie_index_prefix(&self, name: &str) -> String {
        format!("static const uint16_t {name}_trieIndex[{{len}}]={{\n")
    }

    fn cp_trie_data_prefix(&self, name: &str, bits: u32) -> String {
        format!("static const uint{bits}_t {name}_trieData[{{len}}]={{\n")
    }

    fn array_postfix(&self) -> &'static str {
        "\n};\n\n"
    }

    fn cp_trie_struct_frame(&self, name: &str) -> StructFrame {
        StructFrame {
            prefix: Some(format!("static const UCPTrie {name}_trie={{\n")),
            index_name: format!("{name}_trieIndex"),
            data_name: format!("{name}_trieData"),
            postfix: Some("};\n\n".to_string()),
        }
    }

    fn write_cp_trie_refs(
        &self,
        out: &mut dyn fmt::Write,
        index_name: &str,
        data_name: &str,
    ) -> fmt::Result {
        write!(out, "    {index_name},\n    {{ {data_name} }},\n")
    }

    fn write_cp_trie_fields(&self, out: &mut dyn fmt::Write, trie: &CodePointTrie) -> fmt::Result {
        write!(
            out,
            "    {}, {},\n    {:#x}, {:#x},\n    {}, {},\n    0, 0,\n    {:#x}, {:#x},\n    {:#x},\n",
            trie.index_length,
            trie.data_length,
            trie.high_start,
            trie.shifted12_high_start,
            trie.trie_type.tag(),
            trie.value_width,
            trie.index3_null_offset,
            trie.data_null_offset,
            trie.null_value,
        )
    }
}

struct TomlRules;

impl SyntaxRules for TomlRules {
    fn array_indent(&self) -> &'static str {
        "  "
    }

    fn cp_trie_index_prefix(&self, _name: &str) -> String {
        "index = [\n  ".to_string()
    }

    fn cp_trie_data_prefix(&self, _name: &str, bits: u32) -> String {
        format!("data_{bits} = [\n  ")
    }

    fn array_postfix(&self) -> &'static str {
        "\n]\n"
    }

    fn cp_trie_struct_frame(&self, _name: &str) -> StructFrame {
        StructFrame::default()
    }

    fn write_cp_trie_refs(
        &self,
        _out: &mut dyn fmt::Write,
        _index_name: &str,
        _data_name: &str,
    ) -> fmt::Result {
        Ok(())
    }

    fn write_cp_trie_fields(&self, out: &mut dyn fmt::Write, trie: &CodePointTrie) -> fmt::Result {
        writeln!(out, "indexLength = {}", trie.index_length)?;
        writeln!(out, "dataLength = {}", trie.data_length)?;
        writeln!(out, "highStart = {:#x}", trie.high_start)?;
        writeln!(out, "shifted12HighStart = {:#x}", trie.shifted12_high_start)?;
        writeln!(out, "type = {}", trie.trie_type.tag())?;
        writeln!(out, "valueWidth = {}", trie.value_width)?;
        writeln!(out, "index3NullOffset = {:#x}", trie.index3_null_offset)?;
        writeln!(out, "dataNullOffset = {:#x}", trie.data_null_offset)?;
        writeln!(out, "nullValue = {:#x}", trie.null_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_as_str() {
        for &s in &[TargetSyntax::CCode, TargetSyntax::Toml] {
            assert_eq!(TargetSyntax::parse(s.as_str()), Some(s));
        }
        assert_eq!(TargetSyntax::parse("yaml"), None);
    }

    #[test]
    fn file_name_extension_selects_syntax() {
        assert_eq!(
            TargetSyntax::from_file_name("uprops_data.h"),
            Some(TargetSyntax::CCode)
        );
        assert_eq!(
            TargetSyntax::from_file_name("gc.toml"),
            Some(TargetSyntax::Toml)
        );
        assert_eq!(TargetSyntax::from_file_name("README"), None);
        assert_eq!(TargetSyntax::from_file_name("data.bin"), None);
    }

    #[test]
    fn comment_prefix_follows_syntax() {
        assert_eq!(TargetSyntax::CCode.comment_prefix(), "//");
        assert_eq!(TargetSyntax::Toml.comment_prefix(), "#");
    }

    #[test]
    fn c_prefixes_keep_len_placeholder() {
        let rules = TargetSyntax::CCode.rules();
        assert_eq!(
            rules.cp_trie_index_prefix("gc"),
            "static const uint16_t gc_trieIndex[{len}]={\n"
        );
        assert_eq!(
            rules.cp_trie_data_prefix("gc", 8),
            "static const uint8_t gc_trieData[{len}]={\n"
        );
    }
}
