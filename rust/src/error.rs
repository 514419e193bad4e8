use thiserror::Error;

use crate::IDVersion;

/// Validation failures for a single identifier.
///
/// Every variant is local to the identifier that produced it and carries
/// the offending text so callers can report, skip or abort as they see fit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmittenError {
    #[error("Identifier '{0}' contains a space or a line termination character!")]
    MalformedInput(String),

    #[error("{version} identifier '{id}' must have increasing range order ({start}-{end})!")]
    DecreasingRange {
        id: String,
        version: IDVersion,
        start: usize,
        end: usize,
    },

    #[error("Range '{range}' in identifier '{id}' is missing an orientation suffix (_+ or _-)")]
    MissingOrientation { id: String, range: String },

    #[error(
        "Sequence sub-range {start}-{end} in '{id}' is outside the bounds of the parent range length {parent_length}."
    )]
    SubRangeOutOfBounds {
        id: String,
        start: usize,
        end: usize,
        parent_length: usize,
    },

    #[error("Invalid range {start}-{end} in '{id}' for a one-based fully-closed coordinate system.")]
    CoordinateBelowOne { id: String, start: usize, end: usize },

    #[error("Zero-based half-open range {start}-{end} in '{id}' is empty.")]
    EmptyRange { id: String, start: usize, end: usize },

    #[error("Coordinate '{value}' in identifier '{id}' is too large")]
    CoordinateOverflow { id: String, value: String },

    #[error("Identifier '{id}' contains an invalid assembly+sequence structure ('{body}').")]
    AmbiguousIdentifierBody { id: String, body: String },

    #[error("Identifier '{0}' does not have a sequence identifier!")]
    MissingSequenceIdentifier(String),

    #[error("Identifier '{id}' was expected to be {expected} but looks like {found}")]
    UnexpectedVersion {
        id: String,
        expected: IDVersion,
        found: IDVersion,
    },
}

pub type Result<T> = std::result::Result<T, SmittenError>;
