//! Ordered range chains and the validation rules shared by the resolver and
//! the strict parser.
//!
//! The two producers build their chains in opposite orders. The resolver
//! prepends while scanning right to left and ends up outermost first, as the
//! ranges were written. The strict parser appends while scanning and ends up
//! innermost first, which is the order the normalizer folds in. Keeping them
//! as distinct types stops one from being passed where the other is expected.

use std::collections::VecDeque;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{Result, SmittenError};
use crate::{Range, ID_DELIMITER};

/// Ranges in written order: `chain[0]` is the outermost range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedChain(Vec<Range>);

impl ResolvedChain {
    /// Builds the chain from ranges accumulated by prepending.
    pub(crate) fn from_prepended(ranges: VecDeque<Range>) -> Self {
        ResolvedChain(ranges.into())
    }

    pub fn outermost(&self) -> Option<&Range> {
        self.0.first()
    }

    pub fn innermost(&self) -> Option<&Range> {
        self.0.last()
    }

    pub fn into_parsed(self) -> ParsedChain {
        let mut ranges = self.0;
        ranges.reverse();
        ParsedChain(ranges)
    }

    pub fn into_vec(self) -> Vec<Range> {
        self.0
    }
}

impl Deref for ResolvedChain {
    type Target = [Range];

    fn deref(&self) -> &[Range] {
        &self.0
    }
}

/// Ranges deepest first: `chain[0]` is the innermost range and the last
/// element is relative to the root sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedChain(Vec<Range>);

impl ParsedChain {
    /// Builds the chain from ranges accumulated by appending during a right
    /// to left scan.
    pub(crate) fn from_appended(ranges: Vec<Range>) -> Self {
        ParsedChain(ranges)
    }

    pub fn innermost(&self) -> Option<&Range> {
        self.0.first()
    }

    pub fn outermost(&self) -> Option<&Range> {
        self.0.last()
    }

    /// Ranges enclosing the innermost one, nearest enclosure first.
    pub fn enclosing(&self) -> &[Range] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn into_resolved(self) -> ResolvedChain {
        let mut ranges = self.0;
        ranges.reverse();
        ResolvedChain(ranges)
    }
}

impl Deref for ParsedChain {
    type Target = [Range];

    fn deref(&self) -> &[Range] {
        &self.0
    }
}

/// Checks that every range but the outermost fits inside its parent.
///
/// `outer_first` must be in written order.
pub(crate) fn check_containment<'a, I>(id: &str, outer_first: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Range>,
{
    let mut parent_length = None;
    for range in outer_first {
        if let Some(parent_length) = parent_length {
            if range.start > parent_length || range.end > parent_length {
                return Err(SmittenError::SubRangeOutOfBounds {
                    id: id.to_string(),
                    start: range.start,
                    end: range.end,
                    parent_length,
                });
            }
        }
        parent_length = Some(range.length());
    }
    Ok(())
}

/// Checks a one-based, fully-closed pair of bounds.
pub(crate) fn check_one_based(id: &str, start: usize, end: usize) -> Result<()> {
    if start < 1 || end < 1 {
        return Err(SmittenError::CoordinateBelowOne {
            id: id.to_string(),
            start,
            end,
        });
    }
    Ok(())
}

pub(crate) fn parse_bound(id: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|_| SmittenError::CoordinateOverflow {
            id: id.to_string(),
            value: raw.to_string(),
        })
}

/// Splits what is left once all ranges are stripped into an optional
/// assembly and a sequence identifier.
///
/// Legal bodies are `sequence` or `assembly:sequence` with both parts
/// non-empty.
pub(crate) fn split_body<'a>(id: &str, body: &'a str) -> Result<(Option<&'a str>, &'a str)> {
    if body.is_empty() {
        return Err(SmittenError::MissingSequenceIdentifier(id.to_string()));
    }

    let parts: Vec<&str> = body.split(ID_DELIMITER).collect();
    match parts.as_slice() {
        [sequence] => Ok((None, *sequence)),
        [assembly, sequence] if !assembly.is_empty() && !sequence.is_empty() => {
            Ok((Some(*assembly), *sequence))
        }
        _ => Err(SmittenError::AmbiguousIdentifierBody {
            id: id.to_string(),
            body: body.to_string(),
        }),
    }
}

/// Renders `[assembly:]sequence` followed by every range in `outer_first`.
pub(crate) fn render<'a, I>(assembly_id: Option<&str>, sequence_id: &str, outer_first: I) -> String
where
    I: IntoIterator<Item = &'a Range>,
{
    let mut v2_id = String::new();
    if let Some(assembly) = assembly_id {
        v2_id.push_str(assembly);
        v2_id.push(ID_DELIMITER);
    }
    v2_id.push_str(sequence_id);
    for range in outer_first {
        v2_id.push(ID_DELIMITER);
        v2_id.push_str(&range.to_string());
    }
    v2_id
}
