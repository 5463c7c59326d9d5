//! Common types shared across the input records.
//!
//! This module contains:
//! - the fixed JATS document constants (DOCTYPE identifiers, namespaces)
//! - [`Localized`] - text keyed by locale code
//! - text helpers used when copying free text into the document

use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

// ============================================================================
// JATS Constants
// ============================================================================

/// Root element name of an archival article document
pub const JATS_ROOT: &str = "article";

/// Public identifier of the JATS Archiving 1.2 DTD
pub const JATS_DTD_ID: &str =
    "-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.2 20190208//EN";

/// System identifier of the JATS Archiving 1.2 DTD
pub const JATS_DTD_URL: &str = "http://jats.nlm.nih.gov/archiving/1.2/JATS-archivearticle1.dtd";

/// XLink namespace, declared on the root element
pub const XMLNS_XLINK: &str = "http://www.w3.org/1999/xlink";

// ============================================================================
// Localized Text
// ============================================================================

/// A text value available in one or more locales.
///
/// Lookups are exact by locale code. Empty and whitespace-only values are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Localized(BTreeMap<String, String>);

impl Localized {
    /// Creates an empty localized value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a localized value holding a single locale.
    pub fn single(locale: impl Into<String>, value: impl Into<String>) -> Self {
        let mut localized = Self::new();
        localized.set(locale, value);
        localized
    }

    /// Sets the value for a locale, replacing any previous one.
    pub fn set(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        self.0.insert(locale.into(), value.into());
    }

    /// Returns the non-empty value for `locale`.
    pub fn get(&self, locale: &str) -> Option<&str> {
        non_empty(self.0.get(locale).map(String::as_str))
    }

    /// Returns the non-empty value for `locale`, if a locale is known at all.
    pub fn get_opt(&self, locale: Option<&str>) -> Option<&str> {
        locale.and_then(|l| self.get(l))
    }

    /// Returns true if no locale carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    /// Iterates over `(locale, value)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Localized {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Filters out absent, empty and whitespace-only values.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Returns true if `c` may appear in an XML 1.0 document.
///
/// Excluded are the C0 controls other than tab, line feed and carriage
/// return, and the noncharacters U+FFFE and U+FFFF.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Drops characters XML 1.0 cannot represent, even as references.
///
/// Text pasted from PDFs and word processors regularly carries form feeds
/// and other control characters.
pub fn xml_text(text: String) -> String {
    if text.chars().all(is_xml_char) {
        text
    } else {
        text.chars().filter(|&c| is_xml_char(c)).collect()
    }
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static tag pattern"))
}

/// Removes markup from rich text (abstracts, biographies).
///
/// Tags are dropped, predefined XML entities and numeric character
/// references are decoded, and the result is trimmed. Text containing an
/// entity XML does not predefine keeps its entities as written. Returns
/// `None` when nothing but markup and whitespace remains.
pub fn strip_tags(html: &str) -> Option<String> {
    let stripped = tag_pattern().replace_all(html, "");
    let text = match quick_xml::escape::unescape(&stripped) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => stripped.into_owned(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns the final component of a storage path.
pub fn basename(path: &str) -> Option<Cow<'_, str>> {
    std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_lookup_is_exact() {
        let title: Localized = [("en", "Title"), ("fr_CA", "Titre")].into_iter().collect();
        assert_eq!(title.get("en"), Some("Title"));
        assert_eq!(title.get("fr_CA"), Some("Titre"));
        assert_eq!(title.get("fr"), None);
        assert_eq!(title.get_opt(None), None);
    }

    #[test]
    fn test_localized_empty_values_are_absent() {
        let mut name = Localized::single("en", "   ");
        assert_eq!(name.get("en"), None);
        assert!(name.is_empty());

        name.set("de", "Name");
        assert!(!name.is_empty());
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<p>First <em>emphasised</em> line</p>").as_deref(),
            Some("First emphasised line")
        );
        assert_eq!(
            strip_tags("<p>Salt &amp; pepper &#8211; to taste</p>").as_deref(),
            Some("Salt & pepper \u{2013} to taste")
        );
        assert_eq!(strip_tags("<p>&nbsp;kept</p>").as_deref(), Some("&nbsp;kept"));
        assert_eq!(strip_tags("<p> </p><br/>"), None);
        assert_eq!(strip_tags(""), None);
    }

    #[test]
    fn test_xml_text_drops_illegal_characters() {
        assert_eq!(xml_text("Title\u{000C}with form feed".to_string()), "Titlewith form feed");
        assert_eq!(xml_text("Ref\u{0001}one\u{FFFE}".to_string()), "Refone");
        assert_eq!(xml_text("tab\tline\nreturn\r".to_string()), "tab\tline\nreturn\r");
        assert_eq!(xml_text("caf\u{e9} \u{1F600}".to_string()), "caf\u{e9} \u{1F600}");
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }

    #[test]
    fn test_basename() {
        assert_eq!(
            basename("journals/1/articles/7/submission/proof/7-1-21-1.pdf").as_deref(),
            Some("7-1-21-1.pdf")
        );
        assert_eq!(basename("file.xml").as_deref(), Some("file.xml"));
        assert_eq!(basename(""), None);
    }
}
