//! Free-text pagination parsing.
//!
//! Publications store their pages as free text (`pp. 3-8`, `e12`,
//! `e9 – e14`). [`parse_pages`] tries an ordered list of notations and
//! returns the first match as a [`PageRange`]:
//!
//! 1. numeric range: `3-8`
//! 2. e-location range: `e9-e14`
//! 3. single e-location: `e12`
//!
//! Ranges accept a hyphen, an en dash or an em dash, optionally surrounded
//! by whitespace. Matching is case-insensitive and not anchored, so
//! surrounding text such as `pp.` is ignored. Matched text is kept verbatim.

use regex::Regex;
use std::sync::OnceLock;

/// First and last page as they appear in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    /// First page (`fpage`)
    pub first: String,
    /// Last page (`lpage`)
    pub last: String,
}

impl PageRange {
    /// Creates a range.
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }
}

/// The pagination notations, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNotation {
    /// `3-8`
    NumericRange,
    /// `e9-e14`
    ElocationRange,
    /// `e12`
    Elocation,
}

impl PageNotation {
    /// All notations in priority order.
    pub const PRIORITY: [PageNotation; 3] = [
        PageNotation::NumericRange,
        PageNotation::ElocationRange,
        PageNotation::Elocation,
    ];

    fn pattern(&self) -> &'static Regex {
        static NUMERIC_RANGE: OnceLock<Regex> = OnceLock::new();
        static ELOCATION_RANGE: OnceLock<Regex> = OnceLock::new();
        static ELOCATION: OnceLock<Regex> = OnceLock::new();

        match self {
            PageNotation::NumericRange => NUMERIC_RANGE.get_or_init(|| {
                Regex::new(r"(?i)([0-9]+)\s*[-\x{2013}\x{2014}]\s*([0-9]+)")
                    .expect("static page pattern")
            }),
            PageNotation::ElocationRange => ELOCATION_RANGE.get_or_init(|| {
                Regex::new(r"(?i)(e[0-9]+)\s*[-\x{2013}\x{2014}]\s*(e[0-9]+)")
                    .expect("static page pattern")
            }),
            PageNotation::Elocation => ELOCATION
                .get_or_init(|| Regex::new(r"(?i)(e[0-9]+)").expect("static page pattern")),
        }
    }

    /// Matches this notation anywhere in `text`.
    pub fn matches(&self, text: &str) -> Option<PageRange> {
        let caps = self.pattern().captures(text)?;
        let first = caps.get(1)?.as_str();
        let last = match self {
            PageNotation::Elocation => first,
            PageNotation::NumericRange | PageNotation::ElocationRange => caps.get(2)?.as_str(),
        };
        Some(PageRange::new(first, last))
    }
}

/// Parses a free-text pages field.
///
/// Returns `None` when no notation matches.
pub fn parse_pages(text: &str) -> Option<PageRange> {
    PageNotation::PRIORITY
        .iter()
        .find_map(|notation| notation.matches(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_range() {
        assert_eq!(parse_pages("3-8"), Some(PageRange::new("3", "8")));
        assert_eq!(parse_pages("pp. 113 - 127"), Some(PageRange::new("113", "127")));
        assert_eq!(parse_pages("12\u{2013}19"), Some(PageRange::new("12", "19")));
        assert_eq!(parse_pages("12 \u{2014} 19"), Some(PageRange::new("12", "19")));
    }

    #[test]
    fn test_elocation_range() {
        assert_eq!(parse_pages("e9-e14"), Some(PageRange::new("e9", "e14")));
        assert_eq!(parse_pages("E9 \u{2013} E14"), Some(PageRange::new("E9", "E14")));
    }

    #[test]
    fn test_single_elocation() {
        assert_eq!(parse_pages("e12"), Some(PageRange::new("e12", "e12")));
        assert_eq!(parse_pages("Article E7"), Some(PageRange::new("E7", "E7")));
    }

    #[test]
    fn test_numeric_range_takes_priority() {
        // "9-14" satisfies the numeric notation before the e-location ones
        assert_eq!(parse_pages("e9-14"), Some(PageRange::new("9", "14")));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(parse_pages("n/a"), None);
        assert_eq!(parse_pages(""), None);
        assert_eq!(parse_pages("12"), None);
        assert_eq!(parse_pages("3/8"), None);
        assert_eq!(parse_pages("\u{0663}-\u{0668}"), None);
    }

    #[test]
    fn test_notation_matchers() {
        assert!(PageNotation::NumericRange.matches("e9-e14").is_none());
        assert_eq!(
            PageNotation::ElocationRange.matches("e9-e14"),
            Some(PageRange::new("e9", "e14"))
        );
        assert_eq!(
            PageNotation::Elocation.matches("e9-e14"),
            Some(PageRange::new("e9", "e9"))
        );
    }
}
