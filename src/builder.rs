//! Archival document assembly.
//!
//! [`DocumentBuilder`] maps one article, together with its journal and
//! issue, onto a JATS `article` element tree. The target DTD is order
//! sensitive, so the tree is built top-down in a fixed sequence:
//!
//! ```text
//! article
//! ├── front
//! │   ├── journal-meta   journal-id, journal-title-group, issn*, publisher
//! │   └── article-meta   article-id*, article-categories, title-group,
//! │                      contrib-group, aff*, pub-date, volume, issue,
//! │                      fpage, lpage, supplementary-material*, self-uri,
//! │                      kwd-group*, abstract
//! └── back
//!     └── ref-list       ref* (R1..Rn)
//! ```
//!
//! Optional elements appear only when the source value is present. A
//! missing article title fails the article.
//!
//! # Example
//!
//! ```rust
//! use jats_export::builder::DocumentBuilder;
//! use jats_export::host::AttachedFiles;
//! use jats_export::records::{Article, Issue, JournalContext, Publication};
//!
//! let mut journal = JournalContext::new(1, "en");
//! journal.name.set("en", "Journal of Tests");
//! let issue = Issue::new(2);
//! let article = Article::new(3, Publication::new("en", "On Testing"));
//!
//! let host = AttachedFiles::new();
//! let document = DocumentBuilder::new(&journal, &issue, &article, &host)
//!     .build()
//!     .unwrap();
//! let xml = document.to_xml().unwrap();
//! assert!(xml.contains("<article-title>On Testing</article-title>"));
//! ```

use crate::affiliations::AffiliationTable;
use crate::contributors::build_contrib_group;
use crate::error::{Error, Result};
use crate::galleys::{
    resolve_galley, self_uri_element, supplementary_element, GalleyRoles, GalleyTarget,
};
use crate::host::ExportHost;
use crate::pages::parse_pages;
use crate::records::{
    non_empty, strip_tags, Article, Galley, Issue, JournalContext, JATS_ROOT, XMLNS_XLINK,
};
use crate::tree::Element;
use crate::writer::{JatsWriter, WriterConfig};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// A recoverable problem met while building a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A galley had neither a local file nor a remote URL and was left out
    UnresolvableGalley {
        /// Article being built
        article_id: u64,
        /// The galley that was skipped
        galley_id: u64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnresolvableGalley {
                article_id,
                galley_id,
            } => write!(
                f,
                "Unable to add galley {} to article {}",
                galley_id, article_id
            ),
        }
    }
}

/// A built archival document.
#[derive(Debug, Clone)]
pub struct ArticleDocument {
    article_id: u64,
    root: Element,
    warnings: Vec<Warning>,
    writer_config: WriterConfig,
}

impl ArticleDocument {
    /// Id of the article this document describes.
    pub fn article_id(&self) -> u64 {
        self.article_id
    }

    /// The root `article` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The `front` element (journal and article metadata).
    pub fn front(&self) -> Option<&Element> {
        self.root.find("front")
    }

    /// The `back` element (reference list), present when there are citations.
    pub fn back(&self) -> Option<&Element> {
        self.root.find("back")
    }

    /// Recoverable problems met while building.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Serializes the document using the journal's writer settings.
    pub fn to_xml(&self) -> Result<String> {
        JatsWriter::with_config(self.writer_config.clone()).write_to_string(&self.root)
    }

    /// Serializes the document into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        JatsWriter::with_config(self.writer_config.clone()).write(&self.root, writer)
    }
}

/// Builds the archival document for one article.
pub struct DocumentBuilder<'a, H: ExportHost + ?Sized> {
    journal: &'a JournalContext,
    issue: &'a Issue,
    article: &'a Article,
    host: &'a H,
}

impl<'a, H: ExportHost + ?Sized> DocumentBuilder<'a, H> {
    /// Creates a builder for `article`, published in `issue` of `journal`.
    pub fn new(
        journal: &'a JournalContext,
        issue: &'a Issue,
        article: &'a Article,
        host: &'a H,
    ) -> Self {
        Self {
            journal,
            issue,
            article,
            host,
        }
    }

    /// Builds the document.
    ///
    /// Each call builds from scratch; affiliation tokens and warnings are
    /// scoped to the call.
    pub fn build(&self) -> Result<ArticleDocument> {
        debug!(article_id = self.article.id, "Building archival document");

        let mut warnings = Vec::new();

        let front = Element::new("front")
            .child(self.build_journal_meta()?)
            .child(self.build_article_meta(&mut warnings)?);

        let mut root = Element::new(JATS_ROOT)
            .attr("xmlns:xlink", XMLNS_XLINK)
            .child(front);
        root.push_opt(self.build_back());

        Ok(ArticleDocument {
            article_id: self.article.id,
            root,
            warnings,
            writer_config: self.host.export_settings(self.journal).writer,
        })
    }

    fn missing(&self, field: &'static str) -> Error {
        Error::MissingField {
            article_id: self.article.id,
            field,
        }
    }

    /// Builds `journal-meta`.
    fn build_journal_meta(&self) -> Result<Element> {
        let journal = self.journal;
        let mut meta = Element::new("journal-meta");

        if let Some(abbreviation) = journal
            .abbreviation
            .get_opt(self.article.publication.locale())
        {
            meta.push(
                Element::with_text("journal-id", abbreviation).attr("journal-id-type", "publisher"),
            );
        }

        if let Some(title) = journal.localized_name() {
            meta.push(
                Element::new("journal-title-group")
                    .child(Element::with_text("journal-title", title)),
            );
        }

        for (issn, format) in [
            (journal.print_issn(), "print"),
            (journal.online_issn(), "online-only"),
        ] {
            if let Some(issn) = issn {
                meta.push(Element::with_text("issn", issn).attr("publication-format", format));
            }
        }

        if let Some(publisher) = journal.publisher() {
            meta.push(
                Element::new("publisher").child(Element::with_text("publisher-name", publisher)),
            );
        }

        Ok(meta)
    }

    /// Builds `article-meta`.
    fn build_article_meta(&self, warnings: &mut Vec<Warning>) -> Result<Element> {
        let publication = &self.article.publication;
        let locale = publication.locale();
        let mut meta = Element::new("article-meta");

        if let Some(doi) = publication.doi() {
            meta.push(Element::with_text("article-id", doi).attr("pub-id-type", "doi"));
        }
        if let Some(publisher_id) = publication.publisher_id() {
            meta.push(
                Element::with_text("article-id", publisher_id).attr("pub-id-type", "publisher-id"),
            );
        }

        meta.push_opt(self.build_categories());

        let title = publication
            .localized_title()
            .ok_or_else(|| self.missing("article-title"))?;
        meta.push(Element::new("title-group").child(Element::with_text("article-title", title)));

        let mut affiliations = AffiliationTable::new();
        meta.push_opt(build_contrib_group(
            &publication.authors,
            locale,
            &mut affiliations,
        ));
        for aff in affiliations.to_elements() {
            meta.push(aff);
        }

        meta.push_opt(
            publication
                .date_published
                .or(self.issue.date_published)
                .map(pub_date_element),
        );

        meta.push_text_opt("volume", self.issue.volume());
        meta.push_text_opt("issue", self.issue.number());

        if let Some(range) = publication.pages.as_deref().and_then(parse_pages) {
            meta.push(Element::with_text("fpage", range.first));
            meta.push(Element::with_text("lpage", range.last));
        }

        let roles = GalleyRoles::split(&publication.galleys);
        for galley in roles.supplementary {
            if let Some(target) = self.resolve(galley, warnings) {
                meta.push(supplementary_element(&target, galley.label()));
            }
        }
        if let Some(galley) = roles.self_uri {
            if let Some(target) = self.resolve(galley, warnings) {
                meta.push(self_uri_element(&target, galley.label()));
            }
        }

        for (locale, keywords) in &publication.keywords {
            meta.push_opt(kwd_group_element(locale, keywords));
        }

        if let Some(text) = publication.abstract_html.get_opt(locale).and_then(strip_tags) {
            meta.push(Element::new("abstract").child(Element::with_text("p", text)));
        }

        Ok(meta)
    }

    /// Builds `article-categories` from the article's section.
    fn build_categories(&self) -> Option<Element> {
        let locale = self.journal.primary_locale.as_str();
        let title = self
            .article
            .section_id
            .and_then(|id| self.journal.section(id))
            .and_then(|section| section.title.get(locale))?;

        let mut subj_group = Element::new("subj-group");
        subj_group.set_attribute_opt("xml:lang", Some(locale));
        subj_group.set_attribute("subj-group-type", "heading");
        subj_group.push(Element::with_text("subject", title));

        Some(Element::new("article-categories").child(subj_group))
    }

    /// Resolves a galley, recording a warning when it cannot be placed.
    fn resolve(&self, galley: &Galley, warnings: &mut Vec<Warning>) -> Option<GalleyTarget> {
        let target = resolve_galley(galley, self.article.id, self.host);
        if target.is_none() {
            let warning = Warning::UnresolvableGalley {
                article_id: self.article.id,
                galley_id: galley.id,
            };
            warn!(article_id = self.article.id, galley_id = galley.id, "{}", warning);
            warnings.push(warning);
        }
        target
    }

    /// Builds `back/ref-list`, or nothing when there are no citations.
    ///
    /// Blank citations are skipped so reference ids run `R1..Rn` without
    /// gaps.
    fn build_back(&self) -> Option<Element> {
        let mut ref_list = Element::new("ref-list");
        let citations = self
            .article
            .publication
            .citations
            .iter()
            .filter_map(|citation| non_empty(Some(citation.raw.as_str())));

        for (i, raw) in citations.enumerate() {
            ref_list.push(
                Element::new("ref")
                    .attr("id", format!("R{}", i + 1))
                    .child(Element::with_text("mixed-citation", raw)),
            );
        }

        ref_list
            .has_children()
            .then(|| Element::new("back").child(ref_list))
    }
}

/// Builds an `epublish` `pub-date` element.
pub fn pub_date_element(date: NaiveDate) -> Element {
    Element::new("pub-date")
        .attr("pub-type", "epublish")
        .child(Element::with_text("year", date.format("%Y").to_string()))
        .child(Element::with_text("month", format!("{:02}", date.month())))
        .child(Element::with_text("day", format!("{:02}", date.day())))
}

/// Builds a `kwd-group` for one locale, or nothing for an empty list.
///
/// The group's `xml:lang` is the language part of the locale (`en_US` ->
/// `en`).
pub fn kwd_group_element(locale: &str, keywords: &[String]) -> Option<Element> {
    let mut group = Element::new("kwd-group");
    group.set_attribute_opt("xml:lang", Some(language_code(locale)));

    let mut any = false;
    for keyword in keywords {
        any |= group.push_text_opt("kwd", Some(keyword.as_str()));
    }
    any.then_some(group)
}

fn language_code(locale: &str) -> &str {
    match locale.char_indices().nth(2) {
        Some((end, _)) => &locale[..end],
        None => locale,
    }
}

/// Builds the document for one article with a one-off builder.
pub fn build_document<H: ExportHost + ?Sized>(
    journal: &JournalContext,
    issue: &Issue,
    article: &Article,
    host: &H,
) -> Result<ArticleDocument> {
    DocumentBuilder::new(journal, issue, article, host).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{AttachedFiles, ExportSettings};
    use crate::records::{
        is_xml_char, Affiliation, Author, Citation, FileInfo, Localized, Publication, Section,
    };
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn journal() -> JournalContext {
        let mut journal = JournalContext::new(1, "en");
        journal.name.set("en", "Journal of Tests");
        journal.abbreviation.set("en", "J. Tests");
        journal.print_issn = Some("1111-2222".to_string());
        journal.online_issn = Some("3333-4444".to_string());
        journal.publisher_institution = Some("Test Press".to_string());
        journal.sections.push(Section::new(10, "en", "Articles"));
        journal
    }

    fn issue() -> Issue {
        let mut issue = Issue::new(2);
        issue.volume = Some("12".to_string());
        issue.number = Some("3".to_string());
        issue.date_published = NaiveDate::from_ymd_opt(2024, 3, 1);
        issue
    }

    fn full_article() -> Article {
        let mut publication = Publication::new("en", "On Testing");
        publication.doi = Some("10.1234/jot.7".to_string());
        publication.publisher_id = Some("jot-7".to_string());
        publication.pages = Some("pp. 3-8".to_string());
        publication.date_published = NaiveDate::from_ymd_opt(2024, 2, 5);
        publication.abstract_html = Localized::single("en", "<p>We test <b>things</b>.</p>");
        publication
            .keywords
            .insert("en_US".to_string(), vec!["testing".to_string(), "xml".to_string()]);
        publication.keywords.insert("fr_CA".to_string(), Vec::new());
        publication.authors = vec![
            Author::new("en", "Ada", "Lovelace")
                .with_affiliation(Affiliation::new("en", "Acme University").with_ror("https://ror.org/acme")),
            Author::new("en", "Charles", "Babbage")
                .with_affiliation(Affiliation::new("en", "Acme University")),
        ];
        publication.galleys = vec![
            Galley::local(1, "PDF", FileInfo::new("store/7/7-1.pdf", "application/pdf")),
            Galley::remote(2, "Data", "https://data.example.org/7"),
        ];
        publication.citations = vec![
            Citation::new("Smith, J. (2020). A study."),
            Citation::new("Doe, J. (2021). Another study."),
        ];

        let mut article = Article::new(7, publication);
        article.section_id = Some(10);
        article
    }

    fn build(article: &Article) -> ArticleDocument {
        build_document(&journal(), &issue(), article, &AttachedFiles::new()).unwrap()
    }

    #[test]
    fn test_document_skeleton() {
        let doc = build(&full_article());
        let root = doc.root();

        assert_eq!(root.name(), "article");
        assert_eq!(root.attribute("xmlns:xlink"), Some(XMLNS_XLINK));
        assert_eq!(root.child_names(), vec!["front", "back"]);
        assert_eq!(
            doc.front().unwrap().child_names(),
            vec!["journal-meta", "article-meta"]
        );
    }

    #[test]
    fn test_journal_meta_order() {
        let doc = build(&full_article());
        let meta = doc.front().unwrap().find("journal-meta").unwrap();

        assert_eq!(
            meta.child_names(),
            vec!["journal-id", "journal-title-group", "issn", "issn", "publisher"]
        );
        let formats: Vec<_> = meta
            .find_all("issn")
            .map(|i| (i.text(), i.attribute("publication-format").unwrap().to_string()))
            .collect();
        assert_eq!(
            formats,
            vec![
                ("1111-2222".to_string(), "print".to_string()),
                ("3333-4444".to_string(), "online-only".to_string())
            ]
        );
        assert_eq!(
            meta.find_path("publisher/publisher-name").unwrap().text(),
            "Test Press"
        );
    }

    #[test]
    fn test_article_meta_order() {
        let doc = build(&full_article());
        let meta = doc.front().unwrap().find("article-meta").unwrap();

        assert_eq!(
            meta.child_names(),
            vec![
                "article-id",
                "article-id",
                "article-categories",
                "title-group",
                "contrib-group",
                "aff",
                "pub-date",
                "volume",
                "issue",
                "fpage",
                "lpage",
                "supplementary-material",
                "self-uri",
                "kwd-group",
                "abstract",
            ]
        );
    }

    #[test]
    fn test_article_meta_values() {
        let doc = build(&full_article());
        let meta = doc.front().unwrap().find("article-meta").unwrap();

        let ids: Vec<_> = meta
            .find_all("article-id")
            .map(|e| e.attribute("pub-id-type").unwrap())
            .collect();
        assert_eq!(ids, vec!["doi", "publisher-id"]);

        let subj_group = meta.find_path("article-categories/subj-group").unwrap();
        assert_eq!(subj_group.attribute("xml:lang"), Some("en"));
        assert_eq!(subj_group.attribute("subj-group-type"), Some("heading"));
        assert_eq!(subj_group.find("subject").unwrap().text(), "Articles");

        assert_eq!(meta.find("fpage").unwrap().text(), "3");
        assert_eq!(meta.find("lpage").unwrap().text(), "8");
        assert_eq!(meta.find("volume").unwrap().text(), "12");
        assert_eq!(meta.find("issue").unwrap().text(), "3");

        let kwd = meta.find("kwd-group").unwrap();
        assert_eq!(kwd.attribute("xml:lang"), Some("en"));
        assert_eq!(kwd.find_all("kwd").count(), 2);
        assert_eq!(meta.find_all("kwd-group").count(), 1);

        assert_eq!(meta.find_path("abstract/p").unwrap().text(), "We test things.");
    }

    #[test]
    fn test_shared_affiliation_single_aff() {
        let doc = build(&full_article());
        let meta = doc.front().unwrap().find("article-meta").unwrap();

        let affs: Vec<_> = meta.find_all("aff").collect();
        assert_eq!(affs.len(), 1);
        assert_eq!(affs[0].attribute("id"), Some("aff-1"));
        assert!(affs[0].find("institution-wrap").is_some());

        let xml = doc.to_xml().unwrap();
        assert_eq!(xml.matches("<xref ref-type=\"aff\" rid=\"aff-1\"/>").count(), 2);
    }

    #[test]
    fn test_pub_date_prefers_publication_then_issue() {
        let doc = build(&full_article());
        let date = doc.front().unwrap().find_path("article-meta/pub-date").unwrap();
        assert_eq!(date.attribute("pub-type"), Some("epublish"));
        assert_eq!(date.find("year").unwrap().text(), "2024");
        assert_eq!(date.find("month").unwrap().text(), "02");
        assert_eq!(date.find("day").unwrap().text(), "05");

        let mut article = full_article();
        article.publication.date_published = None;
        let doc = build(&article);
        let date = doc.front().unwrap().find_path("article-meta/pub-date").unwrap();
        assert_eq!(date.find("month").unwrap().text(), "03");
        assert_eq!(date.find("day").unwrap().text(), "01");

        let mut issue = issue();
        issue.date_published = None;
        let doc = build_document(&journal(), &issue, &article, &AttachedFiles::new()).unwrap();
        assert!(doc.front().unwrap().find_path("article-meta/pub-date").is_none());
    }

    #[test]
    fn test_self_uri_is_first_galley() {
        let mut article = full_article();
        article.publication.galleys.push(Galley::local(
            3,
            "EPUB",
            FileInfo::new("store/7/7-3.epub", "application/epub+zip"),
        ));

        let doc = build(&article);
        let meta = doc.front().unwrap().find("article-meta").unwrap();

        let self_uris: Vec<_> = meta.find_all("self-uri").collect();
        assert_eq!(self_uris.len(), 1);
        assert_eq!(self_uris[0].attribute("xlink:href"), Some("7/7-1.pdf"));
        assert_eq!(self_uris[0].attribute("content-type"), Some("application/pdf"));

        let hrefs: Vec<_> = meta
            .find_all("supplementary-material")
            .map(|s| s.attribute("xlink:href").unwrap())
            .collect();
        assert_eq!(hrefs, vec!["https://data.example.org/7", "7/7-3.epub"]);
    }

    #[test]
    fn test_unresolvable_galley_warns() {
        let mut article = full_article();
        article.publication.galleys.insert(
            0,
            Galley {
                id: 99,
                label: Some("Broken".to_string()),
                ..Galley::default()
            },
        );

        let doc = build(&article);
        let meta = doc.front().unwrap().find("article-meta").unwrap();

        assert!(meta.find("self-uri").is_none());
        assert_eq!(meta.find_all("supplementary-material").count(), 2);
        assert_eq!(
            doc.warnings(),
            &[Warning::UnresolvableGalley {
                article_id: 7,
                galley_id: 99
            }]
        );
        assert_eq!(
            doc.warnings()[0].to_string(),
            "Unable to add galley 99 to article 7"
        );
    }

    #[test]
    fn test_reference_numbering() {
        let mut article = full_article();
        article.publication.citations.push(Citation::new("Third."));
        article.publication.citations.push(Citation::new("Fourth."));

        let doc = build(&article);
        let refs = doc.back().unwrap().find("ref-list").unwrap();
        let ids: Vec<_> = refs.find_all("ref").map(|r| r.attribute("id").unwrap()).collect();
        assert_eq!(ids, vec!["R1", "R2", "R3", "R4"]);

        let texts: Vec<_> = refs
            .find_all("ref")
            .map(|r| r.find("mixed-citation").unwrap().text())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Smith, J. (2020). A study.",
                "Doe, J. (2021). Another study.",
                "Third.",
                "Fourth."
            ]
        );
    }

    #[test]
    fn test_blank_citations_leave_no_gaps() {
        let mut article = full_article();
        article.publication.citations.insert(1, Citation::new("  "));

        let doc = build(&article);
        let refs = doc.back().unwrap().find("ref-list").unwrap();
        let ids: Vec<_> = refs.find_all("ref").map(|r| r.attribute("id").unwrap()).collect();
        assert_eq!(ids, vec!["R1", "R2"]);
        assert_eq!(
            refs.find_all("ref").nth(1).unwrap().find("mixed-citation").unwrap().text(),
            "Doe, J. (2021). Another study."
        );

        article.publication.citations = vec![Citation::new("")];
        assert!(build(&article).back().is_none());
    }

    #[test]
    fn test_minimal_article_omits_optional_elements() {
        let mut journal = JournalContext::new(1, "en");
        journal.name.set("en", "Journal of Tests");
        journal.print_issn = Some(String::new());
        let mut publication = Publication::new("en", "Bare");
        publication.doi = Some(String::new());
        publication.pages = Some("n/a".to_string());
        publication.abstract_html = Localized::single("en", "<p></p>");
        let article = Article::new(8, publication);

        let doc = build_document(&journal, &Issue::new(1), &article, &AttachedFiles::new()).unwrap();

        assert_eq!(doc.root().child_names(), vec!["front"]);
        let front = doc.front().unwrap();
        assert_eq!(
            front.find("journal-meta").unwrap().child_names(),
            vec!["journal-title-group"]
        );
        assert_eq!(
            front.find("article-meta").unwrap().child_names(),
            vec!["title-group"]
        );

        let xml = doc.to_xml().unwrap();
        assert!(!xml.contains("<issn"));
        assert!(!xml.contains("fpage"));
        assert!(!xml.contains("=\"\""));
        assert!(!xml.contains("/>"));
    }

    #[test]
    fn test_missing_title_fails() {
        let mut article = full_article();
        article.publication.locale = None;
        let err = build_document(&journal(), &issue(), &article, &AttachedFiles::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                article_id: 7,
                field: "article-title"
            }
        ));
    }

    #[test]
    fn test_missing_journal_title_is_omitted() {
        let mut journal = journal();
        journal.name = Localized::new();
        let doc = build_document(&journal, &issue(), &full_article(), &AttachedFiles::new())
            .unwrap();

        let meta = doc.front().unwrap().find("journal-meta").unwrap();
        assert!(meta.find("journal-title-group").is_none());
        assert_eq!(meta.child_names()[0], "journal-id");
        assert!(doc.front().unwrap().find("article-meta").is_some());
    }

    #[test]
    fn test_section_without_title_has_no_categories() {
        let mut article = full_article();
        article.section_id = Some(404);
        let doc = build(&article);
        assert!(doc
            .front()
            .unwrap()
            .find_path("article-meta/article-categories")
            .is_none());
    }

    #[test]
    fn test_output_is_well_formed() {
        let xml = build(&full_article()).to_xml().unwrap();
        assert!(xml.contains("<!DOCTYPE article PUBLIC \"-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.2 20190208//EN\""));

        let mut reader = Reader::from_str(&xml);
        reader.config_mut().check_end_names = true;
        let mut depth = 0usize;
        let mut roots = Vec::new();
        let mut doctypes = 0;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    if depth == 0 {
                        roots.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                    }
                    depth += 1;
                }
                Event::End(_) => depth -= 1,
                Event::DocType(_) => doctypes += 1,
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(depth, 0);
        assert_eq!(roots, vec!["article"]);
        assert_eq!(doctypes, 1);
    }

    #[test]
    fn test_control_characters_do_not_break_output() {
        let mut article = full_article();
        article
            .publication
            .title
            .set("en", "Title\u{000C}with form feed");
        article.publication.citations = vec![Citation::new("Ref\u{0001}one")];

        let doc = build(&article);
        let front = doc.front().unwrap();
        assert_eq!(
            front
                .find_path("article-meta/title-group/article-title")
                .unwrap()
                .text(),
            "Titlewith form feed"
        );

        let xml = doc.to_xml().unwrap();
        assert!(!xml.chars().any(|c| !is_xml_char(c)));
        assert!(xml.contains("<mixed-citation>Refone</mixed-citation>"));

        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Text(text) => {
                    let text = text.unescape().unwrap();
                    assert!(text.chars().all(is_xml_char));
                }
                Event::Eof => break,
                _ => {}
            }
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let article = full_article();
        let journal = journal();
        let issue = issue();
        let host = AttachedFiles::new();
        let builder = DocumentBuilder::new(&journal, &issue, &article, &host);

        let first = builder.build().unwrap().to_xml().unwrap();
        let second = builder.build().unwrap().to_xml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_host_settings_drive_serialization() {
        let host = AttachedFiles::with_settings(ExportSettings::compact());
        let doc = build_document(&journal(), &issue(), &full_article(), &host).unwrap();
        assert!(!doc.to_xml().unwrap().contains('\n'));
    }

    #[test]
    fn test_kwd_group_element() {
        assert!(kwd_group_element("en_US", &[]).is_none());
        assert!(kwd_group_element("en_US", &[String::new()]).is_none());

        let group = kwd_group_element("pt_BR", &["ciência".to_string()]).unwrap();
        assert_eq!(group.attribute("xml:lang"), Some("pt"));
        assert_eq!(group.find("kwd").unwrap().text(), "ciência");

        let group = kwd_group_element("e", &["x".to_string()]).unwrap();
        assert_eq!(group.attribute("xml:lang"), Some("e"));
    }
}
