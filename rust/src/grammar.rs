//! Recognition of a single trailing range suffix.
//!
//! Both matchers look only at the right-hand end of a string. Callers strip
//! one suffix at a time and feed the returned prefix back in.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{IDVersion, Orientation};

// Any of the three grammars: delimiter, bound, separator, bound, optional
// "_" + marker. Bounds are ASCII digits only. The greedy prefix makes the
// suffix the last one written.
static ANY_RANGE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)(([:_])([0-9]+)([-_])([0-9]+)(?:(_)([R+\-]))?)$").expect("valid range pattern")
});

// Current grammar only. The orientation is captured as optional so that a
// bare "start-end" can be reported instead of silently left in the body.
static V2_RANGE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)(:([0-9]+)-([0-9]+)(?:_([+\-]))?)$").expect("valid V2 range pattern")
});

/// A trailing range suffix recognized by [`match_trailing_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSuffix<'a> {
    /// Everything before the suffix.
    pub prefix: &'a str,
    /// The raw suffix text, delimiter included.
    pub suffix: &'a str,
    /// Grammar this suffix belongs to.
    pub version: IDVersion,
    /// Character before the first bound (`:` or `_`).
    pub delimiter: char,
    /// Character between the two bounds (`-` or `_`).
    pub separator: char,
    pub start: &'a str,
    pub end: &'a str,
    /// Trailing `R`, `+` or `-`, if present.
    pub orientation: Option<char>,
    /// Character before the orientation marker, if present.
    pub orientation_delimiter: Option<char>,
}

/// Finds the trailing range suffix of `s` and classifies its grammar.
///
/// Returns `None` when nothing at the end of `s` looks like a range, and
/// also when the delimiters seen do not form any known grammar, in which
/// case the text is part of the identifier body.
pub fn match_trailing_range(s: &str) -> Option<RangeSuffix<'_>> {
    let caps = ANY_RANGE_SUFFIX.captures(s)?;

    let first_char = |idx: usize| caps.get(idx).and_then(|m| m.as_str().chars().next());

    let delimiter = first_char(3)?;
    let separator = first_char(5)?;
    let orientation_delimiter = first_char(7);
    let orientation = first_char(8);

    let version = classify(delimiter, separator, orientation)?;

    Some(RangeSuffix {
        prefix: caps.get(1)?.as_str(),
        suffix: caps.get(2)?.as_str(),
        version,
        delimiter,
        separator,
        start: caps.get(4)?.as_str(),
        end: caps.get(6)?.as_str(),
        orientation,
        orientation_delimiter,
    })
}

/// Grammar of a suffix from its delimiter, separator and marker.
///
/// `:` + `-` is ambiguous on its own: it is V2 only when an explicit `+` or
/// `-` follows, and V1 when nothing follows.
pub fn classify(delimiter: char, separator: char, orientation: Option<char>) -> Option<IDVersion> {
    match (delimiter, separator, orientation) {
        (':', '-', Some('+' | '-')) => Some(IDVersion::V2),
        (':', '-', None) => Some(IDVersion::V1),
        ('_', '_', None | Some('R' | '+' | '-')) => Some(IDVersion::V0),
        _ => None,
    }
}

/// A trailing current-grammar suffix recognized by [`match_v2_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Suffix<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    /// `None` when the range has no `_+`/`_-`; the strict parser rejects it.
    pub orientation: Option<Orientation>,
}

/// Finds a trailing `:start-end[_orient]` suffix. No other grammar is
/// considered.
pub fn match_v2_range(s: &str) -> Option<V2Suffix<'_>> {
    let caps = V2_RANGE_SUFFIX.captures(s)?;
    let orientation = match caps.get(5) {
        Some(m) => Some(Orientation::from_symbol(m.as_str().chars().next()?)?),
        None => None,
    };

    Some(V2Suffix {
        prefix: caps.get(1)?.as_str(),
        suffix: caps.get(2)?.as_str(),
        start: caps.get(3)?.as_str(),
        end: caps.get(4)?.as_str(),
        orientation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_trailing_range() {
        // (input, prefix, version, start, end, orientation)
        let test_cases = vec![
            ("chr1_100_200", "chr1", IDVersion::V0, "100", "200", None),
            ("seq_100_200_R", "seq", IDVersion::V0, "100", "200", Some('R')),
            ("chr_1_100_200_10_20_R", "chr_1_100_200", IDVersion::V0, "10", "20", Some('R')),
            ("chr1:200-1", "chr1", IDVersion::V1, "200", "1", None),
            ("chr1:200-1:10-5", "chr1:200-1", IDVersion::V1, "10", "5", None),
            ("hg38:chr1:100-200_+", "hg38:chr1", IDVersion::V2, "100", "200", Some('+')),
            ("chr1_1_5_3:1-3_-", "chr1_1_5_3", IDVersion::V2, "1", "3", Some('-')),
            ("1_2000_3000_400_500_60_70_8_9", "1_2000_3000_400_500_60_70", IDVersion::V0, "8", "9", None),
        ];

        for (input, prefix, version, start, end, orientation) in test_cases {
            let m = match_trailing_range(input)
                .unwrap_or_else(|| panic!("No suffix matched for ID: {}", input));
            assert_eq!(m.prefix, prefix, "Prefix mismatch for ID: {}", input);
            assert_eq!(m.version, version, "IDVersion mismatch for ID: {}", input);
            assert_eq!(m.start, start, "Start mismatch for ID: {}", input);
            assert_eq!(m.end, end, "End mismatch for ID: {}", input);
            assert_eq!(m.orientation, orientation, "Orientation mismatch for ID: {}", input);
            assert_eq!(format!("{}{}", m.prefix, m.suffix), input);
        }
    }

    #[test]
    fn test_match_trailing_range_delimiters() {
        let m = match_trailing_range("seq_100_200_R").unwrap();
        assert_eq!((m.delimiter, m.separator), ('_', '_'));
        assert_eq!(m.orientation_delimiter, Some('_'));
        assert_eq!(m.suffix, "_100_200_R");

        let m = match_trailing_range("seq:1-2").unwrap();
        assert_eq!((m.delimiter, m.separator), (':', '-'));
        assert_eq!(m.orientation_delimiter, None);
    }

    #[test]
    fn test_no_trailing_range() {
        let test_cases = vec![
            "chr1",
            "hg38:chr1",
            "100_200",
            "100-200",
            "100:200",
            "100:200:",
            "seq:100_200",
            "seq_100-200",
            "chr13:51174549-51174548_R",
            "seq:1-2_",
            "seq:١٠-٢٠",
            "seq_١٠_٢٠",
            "",
        ];
        for input in test_cases {
            assert_eq!(match_trailing_range(input), None, "Unexpected match for ID: {}", input);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(':', '-', Some('+')), Some(IDVersion::V2));
        assert_eq!(classify(':', '-', Some('-')), Some(IDVersion::V2));
        assert_eq!(classify(':', '-', None), Some(IDVersion::V1));
        assert_eq!(classify('_', '_', None), Some(IDVersion::V0));
        assert_eq!(classify('_', '_', Some('R')), Some(IDVersion::V0));
        assert_eq!(classify('_', '_', Some('-')), Some(IDVersion::V0));
        assert_eq!(classify(':', '-', Some('R')), None);
        assert_eq!(classify(':', '_', None), None);
        assert_eq!(classify('_', '-', Some('+')), None);
    }

    #[test]
    fn test_match_v2_range() {
        let m = match_v2_range("hg38:chr1:100-200_+:10-50_-").unwrap();
        assert_eq!(m.prefix, "hg38:chr1:100-200_+");
        assert_eq!((m.start, m.end), ("10", "50"));
        assert_eq!(m.orientation, Some(Orientation::Reverse));

        let m = match_v2_range("chr1:1-200").unwrap();
        assert_eq!(m.orientation, None);
        assert_eq!(m.suffix, ":1-200");

        assert_eq!(match_v2_range("chr1_100_200"), None);
        assert_eq!(match_v2_range("JANCRE010000006.1_5563658_5564462_R"), None);
        assert_eq!(match_v2_range("chr1:100-200_R"), None);
        assert_eq!(match_v2_range("seq:١-٢_+"), None);
    }
}
