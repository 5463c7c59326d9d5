//! Per-article affiliation deduplication.
//!
//! Authors reference institutions by localized name. The first author to
//! name an institution allocates a token (`aff-1`, `aff-2`, ...); later
//! references to an identical name reuse it. The table keeps a name lookup
//! alongside the allocation order so `aff` elements come out in first-seen
//! order.

use crate::records::non_empty;
use crate::tree::Element;
use std::collections::HashMap;

/// A deduplicated institution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationEntry {
    /// Token referenced by `xref rid` and used as the `aff id`
    pub token: String,
    /// Localized institution name
    pub name: String,
    /// ROR identifier recorded by the allocating author
    pub ror: Option<String>,
}

impl AffiliationEntry {
    /// Builds the `aff` element for this institution.
    pub fn to_element(&self) -> Element {
        let institution = Element::with_text("institution", self.name.as_str())
            .attr("content-type", "orgname");

        let aff = Element::new("aff").attr("id", self.token.as_str());
        match non_empty(self.ror.as_deref()) {
            Some(ror) => aff.child(
                Element::new("institution-wrap").child(institution).child(
                    Element::with_text("institution-id", ror).attr("institution-id-type", "ROR"),
                ),
            ),
            None => aff.child(institution),
        }
    }
}

/// Name-to-token table scoped to one article.
#[derive(Debug, Clone, Default)]
pub struct AffiliationTable {
    by_name: HashMap<String, usize>,
    entries: Vec<AffiliationEntry>,
}

impl AffiliationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the token for `name`, allocating one if the name is new.
    ///
    /// The ROR id is recorded only on allocation. Names are compared exactly
    /// (case-sensitive).
    pub fn resolve(&mut self, name: &str, ror: Option<&str>) -> &str {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                let index = self.entries.len();
                self.entries.push(AffiliationEntry {
                    token: format!("aff-{}", index + 1),
                    name: name.to_string(),
                    ror: non_empty(ror).map(str::to_string),
                });
                self.by_name.insert(name.to_string(), index);
                index
            }
        };
        &self.entries[index].token
    }

    /// Entries in allocation order.
    pub fn entries(&self) -> &[AffiliationEntry] {
        &self.entries
    }

    /// Number of distinct institutions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no institution has been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds one `aff` element per institution, in allocation order.
    pub fn to_elements(&self) -> Vec<Element> {
        self.entries.iter().map(AffiliationEntry::to_element).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_reused_by_name() {
        let mut table = AffiliationTable::new();
        assert!(table.is_empty());
        assert_eq!(table.resolve("Acme University", None), "aff-1");
        assert_eq!(table.resolve("Globex Institute", None), "aff-2");
        assert_eq!(table.resolve("Acme University", None), "aff-1");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = AffiliationTable::new();
        assert_eq!(table.resolve("Acme University", None), "aff-1");
        assert_eq!(table.resolve("ACME University", None), "aff-2");
    }

    #[test]
    fn test_ror_comes_from_allocating_reference() {
        let mut table = AffiliationTable::new();
        table.resolve("Acme University", Some("https://ror.org/acme"));
        table.resolve("Acme University", Some("https://ror.org/other"));
        table.resolve("Globex Institute", None);
        table.resolve("Globex Institute", Some("https://ror.org/globex"));

        let entries = table.entries();
        assert_eq!(entries[0].ror.as_deref(), Some("https://ror.org/acme"));
        assert_eq!(entries[1].ror, None);
    }

    #[test]
    fn test_aff_elements() {
        let mut table = AffiliationTable::new();
        table.resolve("Acme University", Some("https://ror.org/acme"));
        table.resolve("Globex Institute", Some(""));

        let affs = table.to_elements();
        assert_eq!(affs.len(), 2);

        assert_eq!(affs[0].attribute("id"), Some("aff-1"));
        let wrap = affs[0].find("institution-wrap").unwrap();
        assert_eq!(wrap.child_names(), vec!["institution", "institution-id"]);
        assert_eq!(wrap.find("institution").unwrap().text(), "Acme University");
        let ror = wrap.find("institution-id").unwrap();
        assert_eq!(ror.text(), "https://ror.org/acme");
        assert_eq!(ror.attribute("institution-id-type"), Some("ROR"));

        assert_eq!(affs[1].attribute("id"), Some("aff-2"));
        assert_eq!(affs[1].child_names(), vec!["institution"]);
        assert_eq!(
            affs[1].find("institution").unwrap().attribute("content-type"),
            Some("orgname")
        );
    }
}
