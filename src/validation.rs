//! XSD validation for archival documents.
//!
//! This module validates produced documents against the JATS Archiving 1.2
//! XML Schema. The schema itself is not bundled; download the JATS
//! Archiving XSD package from the NLM and point [`DEFAULT_SCHEMA_PATH`] (or
//! the `schema_path` argument) at its top-level article schema.
//!
//! # Requirements
//!
//! This module requires the `validation` feature to be enabled and depends on
//! libxml2 being installed on the system.
//!
//! **Ubuntu/Debian:**
//! ```bash
//! sudo apt-get install libxml2-dev
//! ```
//!
//! **macOS:**
//! ```bash
//! brew install libxml2
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use jats_export::validation::{validate_document, validate_file};
//!
//! // Validate a file written by the exporter
//! validate_file("7/7.xml", None)?;
//!
//! // Validate a freshly built document
//! validate_document(&document, Some("/path/to/JATS-archivearticle1-mathml3.xsd"))?;
//! ```

use std::path::Path;

use libxml::parser::Parser;
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};

use crate::builder::ArticleDocument;
use crate::error::{Error, Result};

/// Default path to the JATS schema file (relative to the crate root).
pub const DEFAULT_SCHEMA_PATH: &str = "external/jats_schema/JATS-archivearticle1-mathml3.xsd";

fn schema_context(schema_path: &str) -> Result<SchemaValidationContext> {
    if !Path::new(schema_path).exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Schema file not found: {}", schema_path),
        )));
    }

    let mut schema_parser = SchemaParserContext::from_file(schema_path);
    SchemaValidationContext::from_parser(&mut schema_parser).map_err(|errors| {
        let msg = errors
            .iter()
            .map(|e| e.message.clone().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("; ");
        Error::Validation(format!("Failed to parse schema: {}", msg))
    })
}

/// Validates an XML file against the JATS schema.
///
/// `schema_path` defaults to [`DEFAULT_SCHEMA_PATH`].
pub fn validate_file<P: AsRef<Path>>(xml_path: P, schema_path: Option<&str>) -> Result<()> {
    let xml_path = xml_path.as_ref();

    if !xml_path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("XML file not found: {}", xml_path.display()),
        )));
    }

    let mut validation_context = schema_context(schema_path.unwrap_or(DEFAULT_SCHEMA_PATH))?;

    let parser = Parser::default();
    let doc = parser
        .parse_file(xml_path.to_string_lossy().as_ref())
        .map_err(|e| Error::Validation(format!("Failed to parse XML document: {:?}", e)))?;

    validation_context
        .validate_document(&doc)
        .map_err(|e| Error::Validation(format!("Validation failed: {:?}", e)))?;

    Ok(())
}

/// Validates an XML string against the JATS schema.
pub fn validate_str(xml: &str, schema_path: Option<&str>) -> Result<()> {
    let mut validation_context = schema_context(schema_path.unwrap_or(DEFAULT_SCHEMA_PATH))?;

    let parser = Parser::default();
    let doc = parser
        .parse_string(xml)
        .map_err(|e| Error::Validation(format!("Failed to parse XML string: {:?}", e)))?;

    validation_context
        .validate_document(&doc)
        .map_err(|e| Error::Validation(format!("Validation failed: {:?}", e)))?;

    Ok(())
}

/// Serializes a built document and validates the result.
pub fn validate_document(document: &ArticleDocument, schema_path: Option<&str>) -> Result<()> {
    let xml = document.to_xml()?;
    validate_str(&xml, schema_path)
}
