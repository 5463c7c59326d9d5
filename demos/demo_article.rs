//! demo_article - Build and print the archival document for a sample article.
//!
//! Assembles a small record set in memory (two authors sharing an
//! institution, a PDF galley, a remote dataset, two references) and prints
//! the resulting JATS document followed by any build warnings.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_article
//! ```

use chrono::NaiveDate;

use jats_export::records::{
    Affiliation, Article, Author, Citation, FileInfo, Galley, Issue, JournalContext, Localized,
    Publication, Section,
};
use jats_export::{build_document, AttachedFiles};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut journal = JournalContext::new(1, "en");
    journal.name.set("en", "Journal of Preservation Studies");
    journal.abbreviation.set("en", "J. Preserv. Stud.");
    journal.online_issn = Some("2049-1234".to_string());
    journal.publisher_institution = Some("Open Archive Press".to_string());
    journal.sections.push(Section::new(4, "en", "Research Articles"));

    let mut issue = Issue::new(12);
    issue.volume = Some("8".to_string());
    issue.number = Some("2".to_string());
    issue.date_published = NaiveDate::from_ymd_opt(2025, 6, 30);

    let mut publication = Publication::new("en", "Bit Rot in Long-Term Archives");
    publication.doi = Some("10.5555/jps.2025.17".to_string());
    publication.pages = Some("e17".to_string());
    publication.abstract_html = Localized::single(
        "en",
        "<p>We measure <em>silent corruption</em> across three repositories.</p>",
    );
    publication.keywords.insert(
        "en_US".to_string(),
        vec!["fixity".to_string(), "digital preservation".to_string()],
    );

    let mut lead = Author::new("en", "Grace", "Hopper").with_affiliation(
        Affiliation::new("en", "Acme University").with_ror("https://ror.org/00acme000"),
    );
    lead.orcid = Some("https://orcid.org/0000-0002-1825-0097".to_string());
    lead.orcid_verified = true;
    lead.email = Some("grace@example.org".to_string());
    lead.country = Some("US".to_string());

    publication.authors = vec![
        lead,
        Author::new("en", "Alan", "Turing")
            .with_affiliation(Affiliation::new("en", "Acme University")),
    ];
    publication.galleys = vec![
        Galley::local(
            31,
            "PDF",
            FileInfo::new("journals/1/articles/17/17-31-1-PB.pdf", "application/pdf"),
        ),
        Galley::remote(32, "Dataset", "https://data.example.org/jps/17"),
    ];
    publication.citations = vec![
        Citation::new("Rosenthal, D. (2010). Bit preservation: a solved problem?"),
        Citation::new("Baker, M. et al. (2006). A fresh look at the reliability of long-term digital storage."),
    ];

    let mut article = Article::new(17, publication);
    article.section_id = Some(4);

    let document = build_document(&journal, &issue, &article, &AttachedFiles::new())?;
    println!("{}", document.to_xml()?);

    for warning in document.warnings() {
        eprintln!("warning: {}", warning);
    }

    Ok(())
}
