//! Extraction of a located sub-sequence from a contig.
//!
//! Locations are **1-based and inclusive at both ends**: `start = 1, end = 4` covers the
//! first four bases, i.e. the 0-based half-open range `0..4`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Orientation of a location relative to the reference.
///
/// Serialized as the integers `1` and `-1`. When reading the integer form, only `-1`
/// means reverse; every other value is treated as forward.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(from = "i64", into = "i64")]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl From<i64> for Strand {
    fn from(v: i64) -> Self {
        if v == -1 {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

impl From<Strand> for i64 {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => 1,
            Strand::Reverse => -1,
        }
    }
}

/// A genomic interval, 1-based and inclusive at both ends.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
}

impl Location {
    pub fn new(start: usize, end: usize, strand: Strand) -> Self {
        Self { start, end, strand }
    }

    pub fn forward(start: usize, end: usize) -> Self {
        Self::new(start, end, Strand::Forward)
    }

    pub fn reverse(start: usize, end: usize) -> Self {
        Self::new(start, end, Strand::Reverse)
    }

    /// Number of bases covered by the location.
    pub fn len(&self) -> usize {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strand = match self.strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        };
        write!(f, "{}..{}({})", self.start, self.end, strand)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("location {0} starts at 0, but positions are 1-based")]
    ZeroStart(Location),

    #[error("location {0} ends before it starts")]
    Inverted(Location),

    #[error("location {loc} ends past the end of the sequence ({len} bases)")]
    OutOfRange { loc: Location, len: usize },

    #[error("sequence has non-ASCII character {found:?} at byte {pos}")]
    NonAscii { found: char, pos: usize },
}

/// Watson-Crick complement of a single base, preserving case. Anything else (such as `N`)
/// is returned unchanged.
#[inline]
pub fn complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'a' => b't',
        b't' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        other => other,
    }
}

/// Reverses `seq` and complements each base. Applying this twice returns the input for any
/// sequence over `ATGCatgc`. Characters without a complement, ASCII or not, are kept.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| if c.is_ascii() { complement(c as u8) as char } else { c })
        .collect()
}

/// Returns the part of `seq` covered by `loc`, reverse-complemented on the reverse strand.
///
/// Positions count bytes, which for ASCII sequences is one base each.
///
/// # Panics
///
/// The location is not checked. This panics if `loc.start` is 0, if `loc.end` is past the
/// end of `seq`, if `loc.start > loc.end + 1`, or if either end falls inside a multi-byte
/// character. A location with `start == end + 1` yields an empty string. Use
/// [`try_extract`] when the location comes from untrusted input.
pub fn extract(seq: &str, loc: &Location) -> String {
    // 1-based inclusive [start, end] is 0-based [start - 1, end)
    let snippet = &seq[loc.start - 1..loc.end];

    match loc.strand {
        Strand::Reverse => reverse_complement(snippet),
        Strand::Forward => snippet.to_string(),
    }
}

/// Like [`extract`], but rejects non-ASCII sequences and locations that do not lie within
/// `seq`.
pub fn try_extract(seq: &str, loc: &Location) -> Result<String, ExtractError> {
    if let Some((pos, found)) = seq.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(ExtractError::NonAscii { found, pos });
    }
    if loc.start == 0 {
        return Err(ExtractError::ZeroStart(*loc));
    }
    if loc.start > loc.end {
        return Err(ExtractError::Inverted(*loc));
    }
    if loc.end > seq.len() {
        return Err(ExtractError::OutOfRange {
            loc: *loc,
            len: seq.len(),
        });
    }
    Ok(extract(seq, loc))
}
