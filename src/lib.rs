//! Archival JATS XML export for journal article metadata.
//!
//! This crate turns an in-memory bibliographic record set (journal, issue,
//! article, authors, affiliations, galleys, citations) into a single JATS
//! Archiving 1.2 document per article, suitable for preservation ingestion.
//!
//! # Features
//!
//! - **Document Builder**: Maps records onto the `article` element tree in
//!   the element order the DTD requires, omitting anything without data.
//! - **Affiliation Deduplication**: One `aff` per distinct institution,
//!   referenced from each author.
//! - **Galley Roles**: The first galley becomes the `self-uri`, the rest
//!   `supplementary-material`.
//! - **Pagination Parsing**: `3-8`, `e9-e14` and `e12` notations.
//! - **Batch Export**: Per-article archive paths, failure isolation.
//! - **Serde Support**: Optional serialization with the `serde` feature.
//!
//! # Quick Start
//!
//! ```rust
//! use jats_export::host::AttachedFiles;
//! use jats_export::records::{Affiliation, Article, Author, Issue, JournalContext, Publication};
//! use jats_export::build_document;
//!
//! let mut journal = JournalContext::new(1, "en");
//! journal.name.set("en", "Journal of Tests");
//!
//! let mut publication = Publication::new("en", "On Testing");
//! publication.pages = Some("pp. 3-8".to_string());
//! publication.authors.push(
//!     Author::new("en", "Ada", "Lovelace")
//!         .with_affiliation(Affiliation::new("en", "Acme University")),
//! );
//! let article = Article::new(7, publication);
//!
//! let document = build_document(&journal, &Issue::new(2), &article, &AttachedFiles::new())?;
//! let xml = document.to_xml()?;
//! assert!(xml.contains("<fpage>3</fpage>"));
//! assert!(xml.contains("<aff id=\"aff-1\">"));
//! # Ok::<(), jats_export::Error>(())
//! ```
//!
//! # Module Structure
//!
//! - [`records`] - Input record types
//! - [`builder`] - Document assembly
//! - [`contributors`] and [`affiliations`] - Authors and institutions
//! - [`galleys`] - self-uri / supplementary-material selection
//! - [`pages`] - Free-text pagination parsing
//! - [`tree`] and [`writer`] - Element tree and XML serialization
//! - [`host`] - The boundary to the publishing platform
//! - [`export`] - Batch export
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `cli` - Build the `jats_export` command-line tool
//! - `validation` - Validate documents against the JATS XSD via libxml2

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod affiliations;
pub mod builder;
pub mod contributors;
pub mod error;
pub mod export;
pub mod galleys;
pub mod host;
pub mod pages;
pub mod records;
pub mod tree;
pub mod writer;

#[cfg(feature = "validation")]
pub mod validation;

// Re-export commonly used types at the crate root
pub use builder::{build_document, ArticleDocument, DocumentBuilder, Warning};
pub use error::{Error, Result};
pub use export::{export_article, export_issue, export_records, ExportReport, RecordSet};
pub use host::{AttachedFiles, ExportHost, ExportSettings};
pub use pages::{parse_pages, PageRange};
pub use records::{
    Affiliation, Article, Author, Citation, FileInfo, Galley, Issue, JournalContext, Localized,
    Publication, Section,
};
pub use writer::{JatsWriter, WriterConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
