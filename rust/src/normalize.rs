//! Collapsing a chain of nested ranges into one range on the root sequence.

use std::iter;

use crate::chain::{self, ParsedChain};
use crate::error::Result;
use crate::parse::parse;
use crate::Range;

/// Folds `ranges` into a single range relative to the root sequence.
///
/// The innermost range seeds the fold and each enclosing range, nearest
/// first, maps it into its own parent's coordinates. A reverse enclosure
/// mirrors the coordinates within its span and flips the orientation.
/// Returns `None` for an empty chain.
pub fn fold(ranges: &ParsedChain) -> Option<Range> {
    let seed = ranges.innermost()?;
    let mut start_idx = seed.start;
    let mut end_idx = seed.end;
    let mut curr_orient = seed.orientation;

    for range in ranges.enclosing() {
        if range.orientation.is_reverse() {
            start_idx = range.end - start_idx + 1;
            end_idx = range.end - end_idx + 1;
        } else {
            start_idx = range.start + start_idx - 1;
            end_idx = range.start + end_idx - 1;
        }
        curr_orient = curr_orient.compose(range.orientation);
    }

    // An odd number of mirrors leaves the bounds swapped.
    Some(Range::new(
        start_idx.min(end_idx),
        start_idx.max(end_idx),
        curr_orient,
    ))
}

/// Normalizes a chained V2 identifier to one with a single range.
///
/// ```
/// assert_eq!(
///     smitten::normalize("hg38:chr1:100-200_-:10-20_+").unwrap(),
///     "hg38:chr1:181-191_-"
/// );
/// ```
///
/// Identifiers without ranges are returned unchanged.
pub fn normalize(id: &str) -> Result<String> {
    let parsed = parse(id)?;
    match fold(&parsed.ranges) {
        Some(range) => Ok(chain::render(
            parsed.assembly_id.as_deref(),
            &parsed.sequence_id,
            iter::once(&range),
        )),
        None => Ok(id.to_string()),
    }
}
