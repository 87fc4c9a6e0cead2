//! Code point maps and sets as read-only range sources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MAX_CODE_POINT: u32 = 0x10ffff;

/// A total function from code points to 32-bit values, queried by runs.
pub trait CodePointMap {
    /// End and value of the maximal run of equal values starting at `start`, or `None`
    /// once `start` is past the last code point.
    fn get_range(&self, start: u32) -> Option<(u32, u32)>;
}

/// Resolves values to display names for range listings.
pub trait ValueNameGetter {
    fn value_name(&self, value: u32) -> Option<&str>;
}

impl ValueNameGetter for BTreeMap<u32, String> {
    fn value_name(&self, value: u32) -> Option<&str> {
        self.get(&value).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRange {
    pub start: u32,
    pub end: u32,
    pub value: u32,
}

/// A code point map given by explicit ranges; code points outside every range map to
/// `default_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRangeMap")]
pub struct RangeMap {
    default_value: u32,
    ranges: Vec<MapRange>,
}

#[derive(Deserialize)]
struct RawRangeMap {
    #[serde(default)]
    default_value: u32,
    ranges: Vec<MapRange>,
}

impl TryFrom<RawRangeMap> for RangeMap {
    type Error = String;

    fn try_from(raw: RawRangeMap) -> Result<Self, Self::Error> {
        RangeMap::new(raw.default_value, raw.ranges)
    }
}

impl RangeMap {
    /// `ranges` must be sorted, non-overlapping and within the code point space.
    pub fn new(default_value: u32, ranges: Vec<MapRange>) -> Result<Self, String> {
        let mut prev_end: Option<u32> = None;
        for r in &ranges {
            if r.start > r.end || r.end > MAX_CODE_POINT {
                return Err(format!(
                    "invalid range [{:#x}, {:#x}]",
                    r.start, r.end
                ));
            }
            if let Some(prev_end) = prev_end {
                if r.start <= prev_end {
                    return Err(format!(
                        "range starting at {:#x} overlaps or precedes the range ending at {:#x}",
                        r.start, prev_end
                    ));
                }
            }
            prev_end = Some(r.end);
        }
        Ok(RangeMap {
            default_value,
            ranges,
        })
    }

    /// Value at `cp` and the last code point of the explicit range or gap holding it.
    fn segment_at(&self, cp: u32) -> (u32, u32) {
        let i = self.ranges.partition_point(|r| r.end < cp);
        match self.ranges.get(i) {
            Some(r) if r.start <= cp => (r.end, r.value),
            Some(r) => (r.start - 1, self.default_value),
            None => (MAX_CODE_POINT, self.default_value),
        }
    }
}

impl CodePointMap for RangeMap {
    fn get_range(&self, start: u32) -> Option<(u32, u32)> {
        if start > MAX_CODE_POINT {
            return None;
        }
        let (mut end, value) = self.segment_at(start);
        while end < MAX_CODE_POINT {
            let (next_end, next_value) = self.segment_at(end + 1);
            if next_value != value {
                break;
            }
            end = next_end;
        }
        Some((end, value))
    }
}

/// One element of set iteration: all ranges come first, then all strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetItem {
    Range { start: u32, end: u32 },
    String(Vec<u16>),
}

pub trait UnicodeSetSource {
    fn set_items(&self) -> Box<dyn Iterator<Item = SetItem> + '_>;
}

/// A set of code point ranges plus multi-character strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCodePointSet")]
pub struct CodePointSet {
    ranges: Vec<[u32; 2]>,
    strings: Vec<String>,
}

#[derive(Deserialize)]
struct RawCodePointSet {
    #[serde(default)]
    ranges: Vec<[u32; 2]>,
    #[serde(default)]
    strings: Vec<String>,
}

impl TryFrom<RawCodePointSet> for CodePointSet {
    type Error = String;

    fn try_from(raw: RawCodePointSet) -> Result<Self, Self::Error> {
        CodePointSet::new(raw.ranges, raw.strings)
    }
}

impl CodePointSet {
    /// Each range must satisfy `start <= end <= MAX_CODE_POINT`; ranges may come in any
    /// order and overlap. Ranges are sorted and merged when overlapping or adjacent.
    /// Single code point strings become ranges; the rest are sorted in UTF-16 order and
    /// de-duplicated.
    pub fn new(ranges: Vec<[u32; 2]>, strings: Vec<String>) -> Result<Self, String> {
        if let Some([start, end]) = ranges
            .iter()
            .find(|[start, end]| start > end || *end > MAX_CODE_POINT)
        {
            return Err(format!("invalid set range [{start:#x}, {end:#x}]"));
        }
        let mut all = ranges;
        let mut multi: Vec<String> = Vec::new();
        for s in strings {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => all.push([u32::from(ch), u32::from(ch)]),
                _ => multi.push(s),
            }
        }
        all.sort_unstable();
        let mut merged: Vec<[u32; 2]> = Vec::with_capacity(all.len());
        for [start, end] in all {
            match merged.last_mut() {
                Some(last) if start <= last[1] + 1 => last[1] = last[1].max(end),
                _ => merged.push([start, end]),
            }
        }
        multi.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
        multi.dedup();
        Ok(CodePointSet {
            ranges: merged,
            strings: multi,
        })
    }

    pub fn ranges(&self) -> &[[u32; 2]] {
        &self.ranges
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

impl UnicodeSetSource for CodePointSet {
    fn set_items(&self) -> Box<dyn Iterator<Item = SetItem> + '_> {
        let ranges = self
            .ranges()
            .iter()
            .map(|&[start, end]| SetItem::Range { start, end });
        let strings = self
            .strings()
            .iter()
            .map(|s| SetItem::String(s.encode_utf16().collect()));
        Box::new(ranges.chain(strings))
    }
}
