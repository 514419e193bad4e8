//! The `Identifier` value and its constructors for each format version.

use std::fmt;

use serde::Serialize;

use crate::chain;
use crate::error::{Result, SmittenError};
use crate::normalize::fold;
use crate::parse::{parse, ParsedIdentifier};
use crate::resolve::resolve;
use crate::{IDVersion, Range};

/// A parsed Smitten identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub assembly_id: Option<String>,
    pub sequence_id: String,
    /// Ranges in written order, outermost first.
    pub ranges: Vec<Range>,
    /// Version the identifier was written in, `None` if it had no ranges.
    pub inferred_version: Option<IDVersion>,
}

impl Identifier {
    /// Creates an `Identifier` from an identifier of unknown format, converting it to V2.
    pub fn from_unknown_format(id: &str, zbho: bool) -> Result<(Self, Option<IDVersion>)> {
        let resolution = resolve(id, zbho)?;
        let version = resolution.version;
        let identifier = Identifier {
            assembly_id: resolution.assembly_id,
            sequence_id: resolution.sequence_id,
            ranges: resolution.ranges.into_vec(),
            inferred_version: version,
        };
        Ok((identifier, version))
    }

    /// Parses a V0 (underscore) identifier, or one without ranges.
    pub fn from_v0(id: &str) -> Result<Self> {
        Identifier::from_legacy(id, IDVersion::V0)
    }

    /// Parses a V1 (colon, bound order) identifier, or one without ranges.
    pub fn from_v1(id: &str) -> Result<Self> {
        Identifier::from_legacy(id, IDVersion::V1)
    }

    pub fn from_v2(id: &str) -> Result<Self> {
        parse(id).map(Identifier::from)
    }

    fn from_legacy(id: &str, expected: IDVersion) -> Result<Self> {
        let (identifier, version) = Identifier::from_unknown_format(id, false)?;
        match version {
            Some(found) if found != expected => Err(SmittenError::UnexpectedVersion {
                id: id.to_string(),
                expected,
                found,
            }),
            _ => Ok(identifier),
        }
    }

    /// Collapses all ranges into one range on the root sequence.
    pub fn normalize(&self) -> Result<Self> {
        Ok(match self.absolute_range()? {
            Some(range) => Identifier {
                ranges: vec![range],
                ..self.clone()
            },
            None => self.clone(),
        })
    }

    /// The single range this identifier covers on the root sequence.
    pub fn absolute_range(&self) -> Result<Option<Range>> {
        let parsed = ParsedIdentifier::try_from(self.clone())?;
        Ok(fold(&parsed.ranges))
    }

    /// Checks the ranges the way the parsers do: increasing one-based
    /// bounds, each sub-range inside its parent.
    pub fn validate(&self) -> Result<()> {
        let id = self.to_string();
        for range in &self.ranges {
            if range.start > range.end {
                return Err(SmittenError::DecreasingRange {
                    id,
                    version: IDVersion::V2,
                    start: range.start,
                    end: range.end,
                });
            }
            chain::check_one_based(&id, range.start, range.end)?;
        }
        chain::check_containment(&id, self.ranges.iter())
    }
}

impl From<ParsedIdentifier> for Identifier {
    fn from(parsed: ParsedIdentifier) -> Self {
        Identifier {
            assembly_id: parsed.assembly_id,
            sequence_id: parsed.sequence_id,
            ranges: parsed.ranges.into_resolved().into_vec(),
            inferred_version: Some(IDVersion::V2),
        }
    }
}

impl TryFrom<Identifier> for ParsedIdentifier {
    type Error = SmittenError;

    fn try_from(id: Identifier) -> Result<Self> {
        id.validate()?;
        let mut ranges = id.ranges;
        ranges.reverse();
        Ok(ParsedIdentifier {
            assembly_id: id.assembly_id,
            sequence_id: id.sequence_id,
            ranges: chain::ParsedChain::from_appended(ranges),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v2_id = chain::render(self.assembly_id.as_deref(), &self.sequence_id, self.ranges.iter());
        write!(f, "{}", v2_id)
    }
}
