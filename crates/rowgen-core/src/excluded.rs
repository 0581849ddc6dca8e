//! Per-row exclusion markers read by the test runner.
//!
//! An `ExcludedIndices` set is a list of closed index ranges over the rows a
//! data set generates. A single index is a range of length one. Ranges are
//! validated eagerly: negative bounds and `begin > end` are construction
//! errors, never silently clamped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Closed range `[begin, end]` of generated row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct IndexRange {
    begin: u64,
    end: u64,
}

/// Unchecked wire form; deserialization goes through `IndexRange::new`.
#[derive(Deserialize)]
struct RangeBounds {
    begin: i64,
    end: i64,
}

impl TryFrom<RangeBounds> for IndexRange {
    type Error = Error;

    fn try_from(raw: RangeBounds) -> Result<Self> {
        IndexRange::new(raw.begin, raw.end)
    }
}

impl IndexRange {
    pub fn new(begin: i64, end: i64) -> Result<Self> {
        if begin < 0 || end < 0 {
            return Err(Error::Range(format!(
                "negative index in range {}-{}",
                begin, end
            )));
        }
        if begin > end {
            return Err(Error::Range(format!(
                "range begin {} is greater than end {}",
                begin, end
            )));
        }
        Ok(Self {
            begin: begin as u64,
            end: end as u64,
        })
    }

    pub fn single(index: i64) -> Result<Self> {
        Self::new(index, index)
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, index: u64) -> bool {
        self.begin <= index && index <= self.end
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}-{}", self.begin, self.end)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedIndices {
    ranges: Vec<IndexRange>,
}

impl ExcludedIndices {
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from `(begin, end)` pairs; fails on the first malformed pair.
    pub fn from_ranges<I>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let ranges = ranges
            .into_iter()
            .map(|(b, e)| IndexRange::new(b, e))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { ranges })
    }

    pub fn from_indices<I>(indices: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        Self::from_ranges(indices.into_iter().map(|i| (i, i)))
    }

    pub fn with_range(mut self, begin: i64, end: i64) -> Result<Self> {
        self.ranges.push(IndexRange::new(begin, end)?);
        Ok(self)
    }

    pub fn with_index(self, index: i64) -> Result<Self> {
        self.with_range(index, index)
    }

    /// Linear in the number of ranges.
    pub fn is_excluded(&self, index: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(index))
    }

    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All ranges of both sets.
    pub fn union(&self, other: &ExcludedIndices) -> ExcludedIndices {
        let mut ranges = self.ranges.clone();
        ranges.extend(other.ranges.iter().copied());
        ExcludedIndices { ranges }
    }
}

impl fmt::Display for ExcludedIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

/// Parses `"0,3-5,9"`. Whitespace around items is ignored; an empty string
/// yields an empty set.
impl FromStr for ExcludedIndices {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut out = ExcludedIndices::none();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            // Skip the first char so a leading minus reads as a negative number.
            let dash = item.char_indices().skip(1).find(|(_, c)| *c == '-');
            let (begin, end) = match dash {
                Some((pos, _)) => (&item[..pos], &item[pos + 1..]),
                None => (item, item),
            };
            let begin = parse_bound(begin)?;
            let end = parse_bound(end)?;
            out = out.with_range(begin, end)?;
        }
        Ok(out)
    }
}

fn parse_bound(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| Error::Parse(format!("cannot parse '{}' as a row index", s.trim())))
}
