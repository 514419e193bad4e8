//! Conversion of an identifier in any version of the format to V2.

use std::collections::VecDeque;

use serde::Serialize;

use crate::chain::{self, ResolvedChain};
use crate::error::{Result, SmittenError};
use crate::grammar::{match_trailing_range, RangeSuffix};
use crate::{IDVersion, Orientation, Range};

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The identifier rendered in the current (V2) grammar.
    pub canonical: String,
    /// Version inferred from the ranges, `None` if there were no ranges.
    pub version: Option<IDVersion>,
    pub assembly_id: Option<String>,
    pub sequence_id: String,
    pub ranges: ResolvedChain,
    /// Set when scanning stopped at a suffix from another grammar. That
    /// suffix was kept as part of the sequence identifier.
    pub conflict: Option<GrammarConflict>,
}

/// A range suffix whose grammar disagrees with the one already locked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarConflict {
    pub suffix: String,
    pub locked: IDVersion,
    pub found: IDVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrammarLock {
    Unlocked,
    Locked(IDVersion),
}

/// Converts a Smitten identifier in V0, V1 or V2 format to V2.
///
/// # Arguments
///
/// * `raw` - Sequence identifier in V0, V1, or V2 format
/// * `zero_based_half_open` - if true, treats coordinate ranges as zero-based half-open
///
/// Range suffixes are stripped right to left. The first one locks the
/// version for the whole identifier; scanning stops at the first suffix of
/// a different version and that suffix stays in the sequence identifier.
pub fn resolve(raw: &str, zero_based_half_open: bool) -> Result<Resolution> {
    if raw.contains(|c: char| c.is_whitespace() || c == '\n' || c == '\r') {
        return Err(SmittenError::MalformedInput(raw.to_string()));
    }

    let mut lock = GrammarLock::Unlocked;
    let mut conflict = None;
    let mut body = raw;
    let mut ranges = VecDeque::new();

    while let Some(suffix) = match_trailing_range(body) {
        lock = match lock {
            GrammarLock::Unlocked => GrammarLock::Locked(suffix.version),
            GrammarLock::Locked(locked) if locked == suffix.version => lock,
            GrammarLock::Locked(locked) => {
                conflict = Some(GrammarConflict {
                    suffix: suffix.suffix.to_string(),
                    locked,
                    found: suffix.version,
                });
                break;
            }
        };

        ranges.push_front(suffix_to_range(raw, &suffix, zero_based_half_open)?);
        body = suffix.prefix;
    }

    let ranges = ResolvedChain::from_prepended(ranges);
    chain::check_containment(raw, ranges.iter())?;

    let (assembly_id, sequence_id) = chain::split_body(raw, body)?;
    let canonical = chain::render(assembly_id, sequence_id, ranges.iter());

    let version = match lock {
        GrammarLock::Unlocked => None,
        GrammarLock::Locked(version) => Some(version),
    };

    Ok(Resolution {
        canonical,
        version,
        assembly_id: assembly_id.map(str::to_string),
        sequence_id: sequence_id.to_string(),
        ranges,
        conflict,
    })
}

/// Turns one matched suffix into a one-based, fully-closed range.
fn suffix_to_range(id: &str, suffix: &RangeSuffix<'_>, zero_based_half_open: bool) -> Result<Range> {
    let start = chain::parse_bound(id, suffix.start)?;
    let end = chain::parse_bound(id, suffix.end)?;

    let (start, end, orientation) = if start > end {
        match suffix.version {
            IDVersion::V1 => (end, start, Orientation::Reverse),
            version => {
                return Err(SmittenError::DecreasingRange {
                    id: id.to_string(),
                    version,
                    start,
                    end,
                })
            }
        }
    } else {
        let orientation = match suffix.orientation {
            Some('R') | Some('-') => Orientation::Reverse,
            _ => Orientation::Forward,
        };
        (start, end, orientation)
    };

    // The half-open end is already the closed upper bound.
    let start = if zero_based_half_open {
        start.checked_add(1).ok_or_else(|| SmittenError::CoordinateOverflow {
            id: id.to_string(),
            value: suffix.start.to_string(),
        })?
    } else {
        start
    };

    chain::check_one_based(id, start, end)?;
    if start > end {
        return Err(SmittenError::EmptyRange {
            id: id.to_string(),
            start: start - 1,
            end,
        });
    }

    Ok(Range::new(start, end, orientation))
}
