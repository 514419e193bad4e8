//! Strict parsing of identifiers in the current (V2) grammar.

use serde::Serialize;

use crate::chain::{self, ParsedChain};
use crate::error::{Result, SmittenError};
use crate::grammar::match_v2_range;
use crate::{IDVersion, Range};

/// Components of a V2 identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIdentifier {
    pub assembly_id: Option<String>,
    pub sequence_id: String,
    /// Deepest range first.
    pub ranges: ParsedChain,
}

/// Parses a Smitten V2 identifier into its components.
///
/// No other version is recognized: legacy ranges are left in the sequence
/// identifier, where they usually break the assembly/sequence split. Every
/// range must carry an explicit `_+` or `_-`, and coordinates are taken as
/// one-based and fully closed.
pub fn parse(id: &str) -> Result<ParsedIdentifier> {
    let mut ranges = Vec::new();
    let mut body = id;

    while let Some(suffix) = match_v2_range(body) {
        let orientation = suffix
            .orientation
            .ok_or_else(|| SmittenError::MissingOrientation {
                id: id.to_string(),
                range: suffix.suffix.trim_start_matches(':').to_string(),
            })?;

        let start = chain::parse_bound(id, suffix.start)?;
        let end = chain::parse_bound(id, suffix.end)?;
        if start > end {
            return Err(SmittenError::DecreasingRange {
                id: id.to_string(),
                version: IDVersion::V2,
                start,
                end,
            });
        }
        chain::check_one_based(id, start, end)?;

        ranges.push(Range::new(start, end, orientation));
        body = suffix.prefix;
    }

    let ranges = ParsedChain::from_appended(ranges);
    chain::check_containment(id, ranges.iter().rev())?;

    let (assembly_id, sequence_id) = chain::split_body(id, body)?;

    Ok(ParsedIdentifier {
        assembly_id: assembly_id.map(str::to_string),
        sequence_id: sequence_id.to_string(),
        ranges,
    })
}

impl ParsedIdentifier {
    /// Renders the identifier back to its V2 string.
    pub fn to_v2_string(&self) -> String {
        chain::render(
            self.assembly_id.as_deref(),
            &self.sequence_id,
            self.ranges.iter().rev(),
        )
    }
}
