//! jats_export - Write archival JATS documents for a set of journal records.
//!
//! This tool reads a JSON record set (a journal and its selected issues with
//! their articles) and writes one JATS Archiving 1.2 document per article,
//! laid out the way the archive package expects:
//!
//! ```text
//! <OUTPUT>/<article-id>/<article-id>.xml
//! ```
//!
//! # Usage
//!
//! ```bash
//! jats_export [OPTIONS] <INPUT>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Export into the current directory
//! jats_export records.json
//!
//! # Export with 4 threads into a staging directory, copying galley files
//! jats_export -j 4 --output staging --files-root /var/ojs/files records.json
//!
//! # Compact output with debug logging
//! jats_export --compact --debug records.json
//!
//! # Stage the package in a timestamped batch directory, e.g.
//! # staging/jot_batch_2025-01-09-08-05-03/7/7.xml
//! jats_export --batch --output staging records.json
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use jats_export::export::{batch_directory, export_article, ExportEntry, ExportReport, RecordSet};
use jats_export::host::{AttachedFiles, ExportSettings};
use jats_export::writer::WriterConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Write archival JATS documents for a set of journal records.
#[derive(Parser, Debug)]
#[command(name = "jats_export")]
#[command(version = VERSION)]
#[command(about = "Write archival JATS documents for a set of journal records")]
#[command(long_about = "Reads a JSON record set (journal, issues, articles) and writes one \
    JATS Archiving 1.2 document per article to <OUTPUT>/<id>/<id>.xml.")]
struct Args {
    /// JSON record set to export
    input: PathBuf,

    /// Directory to write the package tree into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Directory galley storage paths are relative to; when given, local
    /// galley files are copied next to their documents
    #[arg(long, value_name = "DIR")]
    files_root: Option<PathBuf>,

    /// Write the package into a batch directory named after the journal
    /// acronym and the current time
    #[arg(long)]
    batch: bool,

    /// Number of article-processing threads to run
    #[arg(short, long, default_value = "1")]
    jobs: usize,

    /// Output compact XML (no indentation)
    #[arg(long)]
    compact: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes an entry's document and, if requested, copies its galley files.
fn write_entry(
    entry: &ExportEntry,
    output: &Path,
    files_root: Option<&Path>,
) -> jats_export::Result<()> {
    let path = entry.write_into(output)?;
    debug!(article_id = entry.article_id, path = %path.display(), "Wrote document");

    if let Some(root) = files_root {
        for file in &entry.galley_files {
            let target = output.join(&file.archive_path);
            fs::copy(root.join(&file.source_path), &target)?;
            debug!(article_id = entry.article_id, path = %target.display(), "Copied galley file");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    if args.jobs == 0 {
        error!("jobs must be at least 1");
        std::process::exit(1);
    }

    let records: RecordSet = serde_json::from_reader(BufReader::new(File::open(&args.input)?))?;
    info!(
        journal_id = records.journal.id,
        issues = records.issues.len(),
        "Loaded record set from {}",
        args.input.display()
    );

    let writer = if args.compact {
        WriterConfig::compact()
    } else {
        WriterConfig::default()
    };
    let host = AttachedFiles::with_settings(ExportSettings { writer });

    let pairs: Vec<_> = records.articles().collect();

    // Builds are independent; collecting keeps the input order either way
    let report: ExportReport = if args.jobs > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .ok();

        pairs
            .par_iter()
            .map(|(issue, article)| export_article(&records.journal, issue, article, &host))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    } else {
        pairs
            .iter()
            .map(|(issue, article)| export_article(&records.journal, issue, article, &host))
            .collect()
    };

    let output = if args.batch {
        let name = batch_directory(&records.journal, chrono::Local::now().naive_local());
        info!(batch = %name, "Staging batch");
        args.output.join(name)
    } else {
        args.output.clone()
    };

    fs::create_dir_all(&output)?;
    let mut write_errors = 0usize;
    for entry in &report.entries {
        if let Err(e) = write_entry(entry, &output, args.files_root.as_deref()) {
            error!(article_id = entry.article_id, "Unable to write article: {}", e);
            write_errors += 1;
        }
    }

    for warning in report.warnings() {
        warn!("{}", warning);
    }
    for failure in &report.failures {
        error!(article_id = failure.article_id, "Export failed: {}", failure.error);
    }

    info!(
        written = report.entries.len() - write_errors,
        failed = report.failures.len() + write_errors,
        warnings = report.warnings().count(),
        output = %output.display(),
        "Export finished"
    );

    if !report.is_complete() || write_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}
