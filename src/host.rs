//! The boundary to the hosting publishing platform.
//!
//! The builder needs exactly two things from its host: the export settings
//! for a journal and the storage location of a galley's file. Everything
//! else about the platform stays on the other side of [`ExportHost`].

use crate::records::{FileInfo, Galley, JournalContext};
use crate::writer::WriterConfig;

/// Per-journal export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExportSettings {
    /// Serialization options for produced documents
    pub writer: WriterConfig,
}

impl ExportSettings {
    /// Settings producing compact (unindented) documents.
    pub fn compact() -> Self {
        Self {
            writer: WriterConfig::compact(),
        }
    }
}

/// Capabilities the document builder requires from its host.
pub trait ExportHost {
    /// Returns the export settings for a journal.
    fn export_settings(&self, journal: &JournalContext) -> ExportSettings;

    /// Resolves the file attached to a galley, if any.
    fn resolve_file(&self, galley: &Galley) -> Option<FileInfo>;
}

/// Host that resolves files from the galley records themselves.
///
/// Suitable when the records were loaded with their file information
/// already attached (the CLI, tests).
#[derive(Debug, Clone, Default)]
pub struct AttachedFiles {
    settings: ExportSettings,
}

impl AttachedFiles {
    /// Creates a host with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host returning `settings` for every journal.
    pub fn with_settings(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl ExportHost for AttachedFiles {
    fn export_settings(&self, _journal: &JournalContext) -> ExportSettings {
        self.settings.clone()
    }

    fn resolve_file(&self, galley: &Galley) -> Option<FileInfo> {
        galley
            .file
            .as_ref()
            .filter(|file| !file.path.trim().is_empty())
            .cloned()
    }
}
