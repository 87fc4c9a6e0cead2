//! Already-built two-level tries, as handed to the serializer.
//!
//! Nothing here builds or queries a trie; these are the read-only shapes of the two
//! binary layouts that get written out: the legacy 16/32-bit trie and the compact
//! code point trie with 8-, 16- or 32-bit values.

use serde::{Deserialize, Serialize};

use crate::array::Elements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrieType {
    Fast,
    Small,
}

impl TrieType {
    pub fn tag(self) -> i32 {
        match self {
            TrieType::Fast => 0,
            TrieType::Small => 1,
        }
    }
}

/// Value width of a code point trie. Tags follow the binary format: 0 is 16-bit, 1 is
/// 32-bit, 2 is 8-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueWidth {
    Bits16,
    Bits32,
    Bits8,
}

impl ValueWidth {
    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(ValueWidth::Bits16),
            1 => Some(ValueWidth::Bits32),
            2 => Some(ValueWidth::Bits8),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            ValueWidth::Bits16 => 16,
            ValueWidth::Bits32 => 32,
            ValueWidth::Bits8 => 8,
        }
    }
}

/// Element width for a raw value width tag; 0 for an unrecognized tag.
pub fn value_width_bits(tag: i32) -> u32 {
    ValueWidth::from_tag(tag).map_or(0, ValueWidth::bits)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrieData {
    Bits8(Vec<u8>),
    Bits16(Vec<u16>),
    Bits32(Vec<u32>),
}

impl TrieData {
    pub fn elements(&self) -> Elements<'_> {
        match self {
            TrieData::Bits8(xs) => Elements::U8(xs),
            TrieData::Bits16(xs) => Elements::U16(xs),
            TrieData::Bits32(xs) => Elements::U32(xs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePointTrie {
    pub index: Vec<u16>,
    pub data: TrieData,
    pub index_length: u32,
    pub data_length: u32,
    /// Start of the last range; every code point at or above it has the high value.
    pub high_start: u32,
    pub shifted12_high_start: u16,
    pub trie_type: TrieType,
    /// Raw tag, see [`ValueWidth`]. Kept raw so unrecognized tags survive to output.
    pub value_width: i32,
    pub index3_null_offset: u16,
    pub data_null_offset: u32,
    pub null_value: u32,
}

impl CodePointTrie {
    pub fn value_width(&self) -> Option<ValueWidth> {
        ValueWidth::from_tag(self.value_width)
    }
}

/// Data array of a legacy trie. The 16-bit variant is written contiguously after the
/// index array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyTrieData {
    Bits16(Vec<u16>),
    Bits32(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTrie {
    pub index: Vec<u16>,
    pub data: LegacyTrieData,
    pub index_length: u32,
    pub data_length: u32,
    pub index2_null_offset: u16,
    pub data_null_offset: u16,
    pub initial_value: u32,
    pub error_value: u32,
    pub high_start: u32,
    pub high_value_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_width_tags_follow_the_binary_format() {
        assert_eq!(ValueWidth::from_tag(0), Some(ValueWidth::Bits16));
        assert_eq!(ValueWidth::from_tag(1), Some(ValueWidth::Bits32));
        assert_eq!(ValueWidth::from_tag(2), Some(ValueWidth::Bits8));
        assert_eq!(ValueWidth::from_tag(3), None);
    }

    #[test]
    fn unrecognized_tag_has_zero_width() {
        assert_eq!(value_width_bits(0), 16);
        assert_eq!(value_width_bits(1), 32);
        assert_eq!(value_width_bits(2), 8);
        assert_eq!(value_width_bits(3), 0);
        assert_eq!(value_width_bits(-1), 0);
    }

    #[test]
    fn trie_data_deserializes_from_tagged_json() {
        let d: TrieData = serde_json::from_str(r#"{"bits8":[1,2,3]}"#).unwrap();
        assert_eq!(d, TrieData::Bits8(vec![1, 2, 3]));
        assert_eq!(d.elements().bits(), 8);
    }
}
