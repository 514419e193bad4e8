/*!
This library provides routines for parsing, converting and normalizing
sequence identifiers in the Smitten format. The format encodes DNA sequence
ranges and strand orientation onto existing sequence identifiers. Ranges may
be recursively defined by adding further subranges, each one relative to the
range before it. The format has evolved over the years and now encompasses
two legacy versions (V0/V1) and the current identifier format (V2).

The library is built from four pieces:

* [`grammar`] recognizes a single trailing range suffix and which version of
  the format it belongs to.
* [`resolve()`] strips suffixes right to left, locks the whole identifier to
  one version and re-renders it as V2.
* [`parse()`] reads an identifier that is already V2, and nothing else.
* [`normalize()`] folds a chain of nested ranges into one absolute range.

```rust
use smitten::{normalize, parse, resolve, IDVersion, Identifier, Orientation};

// Convert a legacy identifier to the current format
let resolved = resolve("chr1_100_200", false).unwrap();
assert_eq!(resolved.canonical, "chr1:100-200_+");
assert_eq!(resolved.version, Some(IDVersion::V0));

// Parse a current identifier, deepest range first
let parsed = parse("hg38:chr1:100-200_+:10-50_-").unwrap();
assert_eq!(parsed.assembly_id.as_deref(), Some("hg38"));
assert_eq!(parsed.sequence_id, "chr1");
assert_eq!(parsed.ranges[0].start, 10);
assert_eq!(parsed.ranges[0].orientation, Orientation::Reverse);

// Collapse a chain of ranges
assert_eq!(
    normalize("hg38:chr1:100-200_+:10-50_-:1-5_+").unwrap(),
    "hg38:chr1:145-149_-"
);

// Or go through the `Identifier` value
let (id, version) = Identifier::from_unknown_format("chr1:200-1", false).unwrap();
assert_eq!(version, Some(IDVersion::V1));
assert_eq!(id.to_string(), "chr1:1-200_-");
```

# Format Specification

There are three versions of the Smitten format supported by this library.
Each one is described with Augmented Backus-Naur Form (ABNF), followed by
examples.

## V0 Format
```abnf
ID = sequence_identifier *[ "_" start_position "_" end_position ["_R"]]
special_chars = ":" / "/" / "?" / "#" / "[" / "]" / "@" / "!" / "$" / "&" / "'" / "(" / ")"
                "*" / "+" / "," / ";" / "=" / "~" / "|" / "^" / """ / ">" / "<" / "." / "%"
                "-" / "_"
sequence_identifier = 1*(ALPHA / DIGIT / special_chars)
start_position = 1*(DIGIT) ; 1-based sequence position
end_position = 1*(DIGIT) ; 1-based sequence position, fully closed coordinates
```
Examples:
```text
Chr1                               seq_id="Chr1", whole chromosome
1_10_30                            seq_id="1", from 10-30, forward strand
seq1_50_100                        seq_id="seq1", from 50-100, forward strand
seq1_1_10_30                       seq_id="seq1_1", from 10-30, forward strand
seq1_1_100_10_30_R                 seq_id="seq1", from 10-30 reverse strand of 1-100 forward strand
chr1_11023_38232_R_100_200         seq_id="chr1", from 100-200 forward strand of 11023-38232 reverse strand
seq1_exon2_100_200_R               seq_id="seq1_exon2", from 100-200 reverse strand
```

## V1 Format
```abnf
ID = sequence_identifier *[ ":" (forward_orient_range / reverse_orient_range) ]
reverse_orient_range = upper_bound "-" lower_bound
forward_orient_range = lower_bound "-" upper_bound
lower_bound = 1*(DIGIT) ; 1-based sequence position
upper_bound = 1*(DIGIT) ; 1-based sequence position, fully closed coordinates
```
Examples:
```text
Seq1:10-30                         seq_id="Seq1", from 10-30, forward strand
Seq1:30-10                         seq_id="Seq1", from 10-30, reverse strand
Seq1:100-200:30-10                 seq_id="Seq1", from 10-30 reverse strand of 100-200 forward strand
```

## V2 Format
```abnf
ID = [assembly_identifier ":"] sequence_identifier *[":" start_position "-" end_position "_" orient]
orient = "+" / "-"
assembly_identifier = 1*(ALPHA / DIGIT / special_chars)
sequence_identifier = 1*(ALPHA / DIGIT / special_chars)
start_position = 1*(DIGIT) ; 1-based sequence position
end_position = 1*(DIGIT) ; 1-based sequence position, fully closed coordinates
```
*/

use std::fmt;

use serde::Serialize;

pub mod chain;
pub mod error;
pub mod grammar;
pub mod identifier;
pub mod normalize;
pub mod parse;
pub mod resolve;

pub use chain::{ParsedChain, ResolvedChain};
pub use error::{Result, SmittenError};
pub use identifier::Identifier;
pub use normalize::{fold, normalize};
pub use parse::{parse, ParsedIdentifier};
pub use resolve::{resolve, GrammarConflict, Resolution};

/// Separates the assembly from the sequence and each range from the next.
pub const ID_DELIMITER: char = ':';

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum IDVersion {
    V0,
    V1,
    V2,
}

impl fmt::Display for IDVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            IDVersion::V0 => "V0",
            IDVersion::V1 => "V1",
            IDVersion::V2 => "V2",
        };
        write!(f, "{}", version_str)
    }
}

/// Strand of a range relative to its parent.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Orientation {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Orientation {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Orientation::Forward),
            '-' => Some(Orientation::Reverse),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Orientation::Reverse
    }

    /// Orientation of a range once placed inside an `enclosing` range.
    pub fn compose(self, enclosing: Orientation) -> Orientation {
        if self.is_reverse() != enclosing.is_reverse() {
            Orientation::Reverse
        } else {
            Orientation::Forward
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A one-based, fully-closed range. Strand is carried by `orientation`,
/// never by bound order.
///
/// Ranges produced by [`resolve()`] and [`parse()`] always have
/// `1 <= start <= end`. The fields are public, so a hand-built value may not;
/// [`Identifier`] validates its ranges before folding them.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
    pub orientation: Orientation,
}

impl Range {
    pub fn new(start: usize, end: usize, orientation: Orientation) -> Self {
        debug_assert!(start <= end, "range bounds out of order: {}-{}", start, end);
        Range {
            start,
            end,
            orientation,
        }
    }

    /// Number of bases covered, which is also the largest coordinate a
    /// sub-range of this range may use.
    pub fn length(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}_{}", self.start, self.end, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_compose() {
        use Orientation::*;
        let cases = vec![
            (Forward, Forward, Forward),
            (Forward, Reverse, Reverse),
            (Reverse, Forward, Reverse),
            (Reverse, Reverse, Forward),
        ];
        for (inner, outer, expected) in cases {
            assert_eq!(inner.compose(outer), expected, "{} inside {}", inner, outer);
        }
    }

    #[test]
    fn test_orientation_symbols() {
        assert_eq!(Orientation::from_symbol('+'), Some(Orientation::Forward));
        assert_eq!(Orientation::from_symbol('-'), Some(Orientation::Reverse));
        assert_eq!(Orientation::from_symbol('R'), None);
        assert_eq!(Orientation::Reverse.to_string(), "-");
    }

    #[test]
    fn test_range_display_and_length() {
        let range = Range::new(100, 200, Orientation::Forward);
        assert_eq!(range.to_string(), "100-200_+");
        assert_eq!(range.length(), 101);
        assert_eq!(Range::new(7, 7, Orientation::Reverse).length(), 1);
    }
}
