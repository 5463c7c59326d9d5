//! Input record types.
//!
//! This module contains the in-memory bibliographic records a document is
//! built from:
//!
//! - [`JournalContext`] - The journal, its sections and publisher details
//! - [`Issue`] - Volume, number and issue publication date
//! - [`Article`] - A submission with its current [`Publication`]
//! - [`Author`] and [`Affiliation`] - Contributors and their institutions
//! - [`Galley`] and [`FileInfo`] - Publication formats and their files
//! - [`Citation`] - Raw reference text
//!
//! Also provides [`Localized`] text and the fixed JATS constants.

mod article;
mod common;
mod journal;

pub use article::{Affiliation, Article, Author, Citation, FileInfo, Galley, Publication};
pub use common::{
    basename, is_xml_char, non_empty, strip_tags, xml_text, Localized, JATS_DTD_ID, JATS_DTD_URL, JATS_ROOT, XMLNS_XLINK,
};
pub use journal::{Issue, JournalContext, Section};
