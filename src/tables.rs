//! Class table and East-Asian-wide table loading: compact JSON formats, range expansion, and
//! process-wide memoisation by source key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::Deserialize;

use crate::class::{GeneralCategory, LineBreakClass};
use crate::error::LbcError;

/// A single inclusive-start range: `[start]` (one code point) or `[start, stop)`.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(untagged)]
enum RawRange {
    Single([u32; 1]),
    Span([u32; 2]),
}

impl RawRange {
    fn bounds(self) -> (u32, u32) {
        match self {
            RawRange::Single([cp]) => (cp, cp + 1),
            RawRange::Span([start, stop]) => (start, stop),
        }
    }
}

/// `{ LineBreakClass => { GeneralCategory => [range, ...] } }`, the wire format of the compact
/// class table.
type RawClassTable = HashMap<String, HashMap<String, Vec<RawRange>>>;

/// A resolved, non-overlapping, sorted list of `(start, stop, class, gc)` entries, looked up by
/// binary search.
#[derive(Debug)]
pub struct ClassTable {
    entries: Vec<(u32, u32, LineBreakClass, GeneralCategory)>,
}

impl ClassTable {
    /// Parses the compact `{class => {gc => [range, ...]}}` JSON format.
    pub fn from_json_str(key: &str, s: &str) -> Result<Self, LbcError> {
        let raw: RawClassTable =
            serde_json::from_str(s).map_err(|source| LbcError::TableParse { key: key.to_owned(), source })?;

        let mut entries = Vec::new();
        for (class_tok, by_gc) in &raw {
            let class = LineBreakClass::parse(class_tok).ok_or_else(|| {
                LbcError::TableParse {
                    key: key.to_owned(),
                    source: serde::de::Error::custom(format!("unknown Line_Break class {class_tok:?}")),
                }
            })?;
            for (gc_tok, ranges) in by_gc {
                let gc = GeneralCategory::parse(gc_tok).ok_or_else(|| LbcError::TableParse {
                    key: key.to_owned(),
                    source: serde::de::Error::custom(format!("unknown General_Category {gc_tok:?}")),
                })?;
                for range in ranges {
                    let (start, stop) = range.bounds();
                    entries.push((start, stop, class, gc));
                }
            }
        }
        entries.sort_by_key(|&(start, ..)| start);
        Ok(ClassTable { entries })
    }

    /// Looks up the (class, General_Category) pair for a code point, falling back to
    /// `AL`/`Cn` (a non-fatal data error) when the code point is not covered by any range.
    pub fn lookup(&self, code_point: u32) -> (LineBreakClass, GeneralCategory) {
        match self.entries.binary_search_by(|&(start, stop, ..)| {
            if code_point < start {
                std::cmp::Ordering::Greater
            } else if code_point >= stop {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        }) {
            Ok(idx) => {
                let (_, _, class, gc) = self.entries[idx];
                (class, gc)
            }
            Err(_) => crate::class::CLASS_DATA_ERROR_FALLBACK,
        }
    }
}

/// A sorted, non-overlapping list of East-Asian-wide `[start, stop)` ranges.
#[derive(Debug)]
pub struct EastAsianTable {
    ranges: Vec<(u32, u32)>,
}

impl EastAsianTable {
    /// Parses the compact `[ [start, stop), ... ]` JSON format.
    pub fn from_json_str(key: &str, s: &str) -> Result<Self, LbcError> {
        let raw: Vec<RawRange> =
            serde_json::from_str(s).map_err(|source| LbcError::TableParse { key: key.to_owned(), source })?;
        let mut ranges: Vec<(u32, u32)> = raw.into_iter().map(RawRange::bounds).collect();
        ranges.sort_unstable();
        Ok(EastAsianTable { ranges })
    }

    /// Whether `code_point` falls in the East-Asian-wide set.
    pub fn contains(&self, code_point: u32) -> bool {
        self.ranges
            .binary_search_by(|&(start, stop)| {
                if code_point < start {
                    std::cmp::Ordering::Greater
                } else if code_point >= stop {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }
}

const DEFAULT_LINE_BREAK_16: &str = include_str!("../data/line_break-16.0.0.json");
const DEFAULT_LINE_BREAK_17: &str = include_str!("../data/line_break-17.0.0.json");
const DEFAULT_EAST_ASIAN_WIDE: &str = include_str!("../data/east_asian_wide.json");

fn builtin_class_table_json(key: &str) -> Option<&'static str> {
    match key {
        "line_break-16.0.0" => Some(DEFAULT_LINE_BREAK_16),
        "line_break-17.0.0" => Some(DEFAULT_LINE_BREAK_17),
        _ => None,
    }
}

fn builtin_eastasian_table_json(key: &str) -> Option<&'static str> {
    match key {
        "east_asian_wide" => Some(DEFAULT_EAST_ASIAN_WIDE),
        _ => None,
    }
}

static CLASS_TABLE_CACHE: Lazy<Mutex<HashMap<String, Arc<ClassTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static EASTASIAN_TABLE_CACHE: Lazy<Mutex<HashMap<String, Arc<EastAsianTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Loads a class table by key, preferring a built-in bundled data set and falling back to
/// reading `key` as a filesystem path. Memoised process-wide: repeat calls with the same key
/// do not re-parse.
pub fn load_class_table(key: &str) -> Result<Arc<ClassTable>, LbcError> {
    if let Some(cached) = CLASS_TABLE_CACHE.lock().unwrap().get(key) {
        return Ok(Arc::clone(cached));
    }
    let json = match builtin_class_table_json(key) {
        Some(s) => s.to_owned(),
        None => std::fs::read_to_string(key)
            .map_err(|source| LbcError::TableIo { key: key.to_owned(), source })?,
    };
    let table = Arc::new(ClassTable::from_json_str(key, &json)?);
    CLASS_TABLE_CACHE.lock().unwrap().insert(key.to_owned(), Arc::clone(&table));
    Ok(table)
}

/// Loads an East-Asian-wide table by key, with the same built-in/filesystem resolution and
/// memoisation as [`load_class_table`].
pub fn load_eastasian_table(key: &str) -> Result<Arc<EastAsianTable>, LbcError> {
    if let Some(cached) = EASTASIAN_TABLE_CACHE.lock().unwrap().get(key) {
        return Ok(Arc::clone(cached));
    }
    let json = match builtin_eastasian_table_json(key) {
        Some(s) => s.to_owned(),
        None => std::fs::read_to_string(key)
            .map_err(|source| LbcError::TableIo { key: key.to_owned(), source })?,
    };
    let table = Arc::new(EastAsianTable::from_json_str(key, &json)?);
    EASTASIAN_TABLE_CACHE.lock().unwrap().insert(key.to_owned(), Arc::clone(&table));
    Ok(table)
}
