//! Batch export of issues.
//!
//! Builds one document per article and lays the results out the way an
//! archive package expects them:
//!
//! ```text
//! <article-id>/<article-id>.xml
//! <article-id>/<galley file basename>
//! ```
//!
//! A failing article is reported and skipped; it never aborts the batch.
//! This module only names and writes documents; reading galley bytes and
//! packing the archive are up to the caller.

use crate::builder::{build_document, ArticleDocument, Warning};
use crate::error::{Error, Result};
use crate::galleys::archive_file_path;
use crate::host::ExportHost;
use crate::records::{Article, Issue, JournalContext};
use chrono::NaiveDateTime;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// An issue together with the articles to export from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct IssueBatch {
    /// The issue
    pub issue: Issue,
    /// Articles in issue sequence order
    pub articles: Vec<Article>,
}

/// Everything one export run needs: the journal and its selected issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RecordSet {
    /// The journal being exported
    pub journal: JournalContext,
    /// Selected issues
    pub issues: Vec<IssueBatch>,
}

impl RecordSet {
    /// Iterates over every `(issue, article)` pair in export order.
    pub fn articles(&self) -> impl Iterator<Item = (&Issue, &Article)> {
        self.issues
            .iter()
            .flat_map(|batch| batch.articles.iter().map(move |a| (&batch.issue, a)))
    }
}

/// A galley file to be packaged next to its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleyFileEntry {
    /// Storage path reported by the host
    pub source_path: String,
    /// Destination inside the archive
    pub archive_path: String,
}

/// A successfully built article.
#[derive(Debug, Clone)]
pub struct ExportEntry {
    /// Article id
    pub article_id: u64,
    /// Destination of the XML document inside the archive
    pub archive_path: String,
    /// The built document
    pub document: ArticleDocument,
    /// Local galley files belonging to the article
    pub galley_files: Vec<GalleyFileEntry>,
}

impl ExportEntry {
    /// Writes the document under `dir` at its archive path, creating the
    /// article directory. Returns the written path.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.archive_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(fs::File::create(&path)?);
        self.document.write_to(&mut out)?;
        out.flush()?;
        Ok(path)
    }
}

/// An article whose document could not be built.
#[derive(Debug)]
pub struct ExportFailure {
    /// Article id
    pub article_id: u64,
    /// Why the build failed
    pub error: Error,
}

/// The outcome of exporting a batch of articles.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Built articles, in export order
    pub entries: Vec<ExportEntry>,
    /// Articles that failed, in export order
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one article.
    pub fn push(&mut self, outcome: std::result::Result<ExportEntry, ExportFailure>) {
        match outcome {
            Ok(entry) => self.entries.push(entry),
            Err(failure) => self.failures.push(failure),
        }
    }

    /// All warnings raised by the built documents.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.entries.iter().flat_map(|e| e.document.warnings())
    }

    /// Returns true if every article was built.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl FromIterator<std::result::Result<ExportEntry, ExportFailure>> for ExportReport {
    fn from_iter<I: IntoIterator<Item = std::result::Result<ExportEntry, ExportFailure>>>(
        iter: I,
    ) -> Self {
        let mut report = Self::new();
        for outcome in iter {
            report.push(outcome);
        }
        report
    }
}

/// Archive path of an article's document: `<id>/<id>.xml`.
pub fn archive_path(article_id: u64) -> String {
    format!("{}/{}.xml", article_id, article_id)
}

/// Name of a batch archive: `<acronym>_batch_<Y-m-d-H-M-S>.zip`.
pub fn batch_file_name(acronym: &str, at: NaiveDateTime) -> String {
    format!("{}.zip", batch_stem(acronym, at))
}

/// Name of the directory a journal's batch is staged in, the archive name
/// without its extension. Journals without an acronym use their id.
pub fn batch_directory(journal: &JournalContext, at: NaiveDateTime) -> String {
    match journal.localized_acronym() {
        Some(acronym) => batch_stem(acronym, at),
        None => batch_stem(&journal.id.to_string(), at),
    }
}

fn batch_stem(acronym: &str, at: NaiveDateTime) -> String {
    format!("{}_batch_{}", acronym, at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Lists the local galley files of an article with their archive paths.
pub fn galley_files<H: ExportHost + ?Sized>(article: &Article, host: &H) -> Vec<GalleyFileEntry> {
    article
        .publication
        .galleys
        .iter()
        .filter_map(|galley| host.resolve_file(galley))
        .filter_map(|file| {
            archive_file_path(article.id, &file.path).map(|archive_path| GalleyFileEntry {
                source_path: file.path,
                archive_path,
            })
        })
        .collect()
}

/// Builds one article.
pub fn export_article<H: ExportHost + ?Sized>(
    journal: &JournalContext,
    issue: &Issue,
    article: &Article,
    host: &H,
) -> std::result::Result<ExportEntry, ExportFailure> {
    match build_document(journal, issue, article, host) {
        Ok(document) => Ok(ExportEntry {
            article_id: article.id,
            archive_path: archive_path(article.id),
            document,
            galley_files: galley_files(article, host),
        }),
        Err(error) => {
            warn!(article_id = article.id, "Export failed: {}", error);
            Err(ExportFailure {
                article_id: article.id,
                error,
            })
        }
    }
}

/// Builds every article of an issue.
pub fn export_issue<H: ExportHost + ?Sized>(
    journal: &JournalContext,
    batch: &IssueBatch,
    host: &H,
) -> ExportReport {
    info!(
        issue_id = batch.issue.id,
        articles = batch.articles.len(),
        "Exporting issue"
    );
    batch
        .articles
        .iter()
        .map(|article| export_article(journal, &batch.issue, article, host))
        .collect()
}

/// Builds every article of every issue in a record set.
pub fn export_records<H: ExportHost + ?Sized>(records: &RecordSet, host: &H) -> ExportReport {
    records
        .articles()
        .map(|(issue, article)| export_article(&records.journal, issue, article, host))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::AttachedFiles;
    use crate::records::{FileInfo, Galley, Publication};
    use chrono::NaiveDate;

    fn records() -> RecordSet {
        let mut journal = JournalContext::new(1, "en");
        journal.name.set("en", "Journal of Tests");

        let mut good = Article::new(7, Publication::new("en", "On Testing"));
        good.publication.galleys = vec![
            Galley::local(1, "PDF", FileInfo::new("store/7/7-1.pdf", "application/pdf")),
            Galley::remote(2, "HTML", "https://example.org/7"),
            Galley {
                id: 3,
                ..Galley::default()
            },
        ];

        let mut untitled = Article::new(8, Publication::default());
        untitled.publication.locale = Some("en".to_string());

        let other = Article::new(9, Publication::new("en", "Later"));

        RecordSet {
            journal,
            issues: vec![
                IssueBatch {
                    issue: Issue::new(1),
                    articles: vec![good, untitled],
                },
                IssueBatch {
                    issue: Issue::new(2),
                    articles: vec![other],
                },
            ],
        }
    }

    #[test]
    fn test_archive_names() {
        assert_eq!(archive_path(42), "42/42.xml");

        let at = NaiveDate::from_ymd_opt(2025, 1, 9)
            .unwrap()
            .and_hms_opt(8, 5, 3)
            .unwrap();
        assert_eq!(batch_file_name("jot", at), "jot_batch_2025-01-09-08-05-03.zip");
    }

    #[test]
    fn test_batch_directory_uses_acronym() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 9)
            .unwrap()
            .and_hms_opt(8, 5, 3)
            .unwrap();
        let mut journal = JournalContext::new(3, "en");
        assert_eq!(batch_directory(&journal, at), "3_batch_2025-01-09-08-05-03");

        journal.acronym.set("en", "jot");
        journal.acronym.set("fr", "rdt");
        assert_eq!(batch_directory(&journal, at), "jot_batch_2025-01-09-08-05-03");
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let report = export_records(&records(), &AttachedFiles::new());

        let built: Vec<_> = report.entries.iter().map(|e| e.article_id).collect();
        assert_eq!(built, vec![7, 9]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].article_id, 8);
        assert!(matches!(
            report.failures[0].error,
            Error::MissingField {
                field: "article-title",
                ..
            }
        ));
        assert!(!report.is_complete());
    }

    #[test]
    fn test_warnings_and_galley_files() {
        let records = records();
        let report = export_issue(&records.journal, &records.issues[0], &AttachedFiles::new());

        let entry = &report.entries[0];
        assert_eq!(entry.archive_path, "7/7.xml");
        assert_eq!(
            entry.galley_files,
            vec![GalleyFileEntry {
                source_path: "store/7/7-1.pdf".to_string(),
                archive_path: "7/7-1.pdf".to_string(),
            }]
        );
        assert_eq!(
            report.warnings().cloned().collect::<Vec<_>>(),
            vec![Warning::UnresolvableGalley {
                article_id: 7,
                galley_id: 3
            }]
        );
    }

    #[test]
    fn test_write_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let records = records();
        let report = export_records(&records, &AttachedFiles::new());

        let path = report.entries[0].write_into(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("7").join("7.xml"));

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<article-title>On Testing</article-title>"));
        assert!(xml.contains("<self-uri content-type=\"application/pdf\""));
    }
}
