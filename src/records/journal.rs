//! Journal-level records: the journal context, its sections, and issues.

use crate::records::common::{non_empty, Localized};
use chrono::NaiveDate;

/// The journal an export run belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct JournalContext {
    /// Journal identifier
    pub id: u64,
    /// Primary locale of the journal (e.g. `en`)
    pub primary_locale: String,
    /// Journal name
    pub name: Localized,
    /// Abbreviated journal title, used as the journal-id
    pub abbreviation: Localized,
    /// Short acronym, used to name export batches
    pub acronym: Localized,
    /// Print ISSN
    pub print_issn: Option<String>,
    /// Online ISSN
    pub online_issn: Option<String>,
    /// Name of the publishing institution
    pub publisher_institution: Option<String>,
    /// Sections articles can be filed under
    pub sections: Vec<Section>,
}

impl JournalContext {
    /// Creates a journal with the given id and primary locale.
    pub fn new(id: u64, primary_locale: impl Into<String>) -> Self {
        Self {
            id,
            primary_locale: primary_locale.into(),
            ..Self::default()
        }
    }

    /// Looks up a section by id.
    pub fn section(&self, id: u64) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Journal name in the primary locale.
    pub fn localized_name(&self) -> Option<&str> {
        self.name.get(&self.primary_locale)
    }

    /// Acronym in the primary locale.
    pub fn localized_acronym(&self) -> Option<&str> {
        self.acronym.get(&self.primary_locale)
    }

    /// Print ISSN, if set.
    pub fn print_issn(&self) -> Option<&str> {
        non_empty(self.print_issn.as_deref())
    }

    /// Online ISSN, if set.
    pub fn online_issn(&self) -> Option<&str> {
        non_empty(self.online_issn.as_deref())
    }

    /// Publisher name, if set.
    pub fn publisher(&self) -> Option<&str> {
        non_empty(self.publisher_institution.as_deref())
    }
}

/// A journal section (e.g. "Articles", "Reviews").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Section {
    /// Section identifier
    pub id: u64,
    /// Section title
    pub title: Localized,
}

impl Section {
    /// Creates a section with a title in one locale.
    pub fn new(id: u64, locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Localized::single(locale, title),
        }
    }
}

/// A published issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Issue {
    /// Issue identifier
    pub id: u64,
    /// Volume
    pub volume: Option<String>,
    /// Issue number
    pub number: Option<String>,
    /// Publication date of the issue
    pub date_published: Option<NaiveDate>,
}

impl Issue {
    /// Creates an issue with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Volume, if set.
    pub fn volume(&self) -> Option<&str> {
        non_empty(self.volume.as_deref())
    }

    /// Issue number, if set.
    pub fn number(&self) -> Option<&str> {
        non_empty(self.number.as_deref())
    }
}
