//! Error types for the JATS export library.

use thiserror::Error;

/// Errors that can occur when building or writing an archival document.
#[derive(Error, Debug)]
pub enum Error {
    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A field the document cannot be built without is absent
    #[error("Missing required field for article {article_id}: {field}")]
    MissingField {
        /// The article whose export failed
        article_id: u64,
        /// Name of the absent field
        field: &'static str,
    },

    /// Unusable writer configuration
    #[error("Invalid writer configuration: {0}")]
    Config(String),

    /// Schema validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
