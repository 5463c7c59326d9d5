//! Article-level records: the submission, its current publication, and the
//! authors, galleys and citations hanging off it.

use crate::records::common::{non_empty, Localized};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A submission to be exported as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Article {
    /// Submission identifier; names the document inside the archive
    pub id: u64,
    /// Section the article is filed under
    pub section_id: Option<u64>,
    /// The current publication (version) of the article
    pub publication: Publication,
}

impl Article {
    /// Creates an article around its current publication.
    pub fn new(id: u64, publication: Publication) -> Self {
        Self {
            id,
            section_id: None,
            publication,
        }
    }
}

/// The metadata of one published version of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Publication {
    /// Publication identifier
    pub id: u64,
    /// Locale the publication is written in
    pub locale: Option<String>,
    /// Article title
    pub title: Localized,
    /// Abstract, possibly containing HTML markup
    #[cfg_attr(feature = "serde", serde(rename = "abstract"))]
    pub abstract_html: Localized,
    /// Digital Object Identifier
    pub doi: Option<String>,
    /// Publisher-assigned identifier
    pub publisher_id: Option<String>,
    /// Free-text pagination (e.g. `pp. 3-8`, `e12`)
    pub pages: Option<String>,
    /// Keywords grouped by locale
    pub keywords: BTreeMap<String, Vec<String>>,
    /// Authors in declared order
    pub authors: Vec<Author>,
    /// Galleys in publication order; the first is the primary artifact
    pub galleys: Vec<Galley>,
    /// Citations in source order
    pub citations: Vec<Citation>,
    /// Publication date
    pub date_published: Option<NaiveDate>,
}

impl Publication {
    /// Creates a publication in `locale` with the given title.
    pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            title: Localized::single(locale.clone(), title),
            locale: Some(locale),
            ..Self::default()
        }
    }

    /// The publication locale, if set.
    pub fn locale(&self) -> Option<&str> {
        non_empty(self.locale.as_deref())
    }

    /// Title in the publication locale.
    pub fn localized_title(&self) -> Option<&str> {
        self.title.get_opt(self.locale())
    }

    /// DOI, if set.
    pub fn doi(&self) -> Option<&str> {
        non_empty(self.doi.as_deref())
    }

    /// Publisher id, if set.
    pub fn publisher_id(&self) -> Option<&str> {
        non_empty(self.publisher_id.as_deref())
    }
}

/// A contributor to a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Author {
    /// Given name
    pub given_name: Localized,
    /// Family name
    pub family_name: Localized,
    /// Affiliations in declared order
    pub affiliations: Vec<Affiliation>,
    /// ORCID iD (usually as a URL)
    pub orcid: Option<String>,
    /// Whether the ORCID iD was verified through ORCID's API
    pub orcid_verified: bool,
    /// Email address
    pub email: Option<String>,
    /// Personal URL
    pub url: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Biography, possibly containing HTML markup
    pub biography: Localized,
}

impl Author {
    /// Creates an author with names in one locale.
    pub fn new(
        locale: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        Self {
            given_name: Localized::single(locale.clone(), given_name),
            family_name: Localized::single(locale, family_name),
            ..Self::default()
        }
    }

    /// Adds an affiliation.
    pub fn with_affiliation(mut self, affiliation: Affiliation) -> Self {
        self.affiliations.push(affiliation);
        self
    }
}

/// An institution an author is affiliated with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Affiliation {
    /// Institution name
    pub name: Localized,
    /// Research Organization Registry identifier
    pub ror: Option<String>,
}

impl Affiliation {
    /// Creates an affiliation named in one locale.
    pub fn new(locale: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Localized::single(locale, name),
            ror: None,
        }
    }

    /// Sets the ROR identifier.
    pub fn with_ror(mut self, ror: impl Into<String>) -> Self {
        self.ror = Some(ror.into());
        self
    }

    /// ROR identifier, if set.
    pub fn ror(&self) -> Option<&str> {
        non_empty(self.ror.as_deref())
    }
}

/// Storage location and type of a file attached to a galley.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FileInfo {
    /// Storage path of the file; only its basename reaches the document
    pub path: String,
    /// MIME type
    pub mimetype: Option<String>,
}

impl FileInfo {
    /// Creates a file record.
    pub fn new(path: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mimetype: Some(mimetype.into()),
        }
    }
}

/// A publication format of an article (PDF, HTML, dataset, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Galley {
    /// Galley identifier
    pub id: u64,
    /// Display label (e.g. `PDF`)
    pub label: Option<String>,
    /// Attached local file
    pub file: Option<FileInfo>,
    /// Remote URL, for galleys hosted elsewhere
    pub remote_url: Option<String>,
}

impl Galley {
    /// Creates a galley backed by a local file.
    pub fn local(id: u64, label: impl Into<String>, file: FileInfo) -> Self {
        Self {
            id,
            label: Some(label.into()),
            file: Some(file),
            remote_url: None,
        }
    }

    /// Creates a galley pointing at a remote URL.
    pub fn remote(id: u64, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            label: Some(label.into()),
            file: None,
            remote_url: Some(url.into()),
        }
    }

    /// Label, if set.
    pub fn label(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
    }

    /// Remote URL, if set.
    pub fn remote_url(&self) -> Option<&str> {
        non_empty(self.remote_url.as_deref())
    }
}

/// A reference cited by the article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Citation {
    /// The citation exactly as entered
    pub raw: String,
}

impl Citation {
    /// Creates a citation from its raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}
