//! Galley file roles: `self-uri` and `supplementary-material`.
//!
//! The first galley of a publication is the article's own representation
//! and becomes the `self-uri`; every other galley becomes a
//! `supplementary-material` node. Galley order is taken as given.
//!
//! A galley resolves either to a local file, referenced by its path inside
//! the archive (`<article-id>/<basename>`), or to its remote URL. A galley
//! resolving to neither produces no node.

use crate::host::ExportHost;
use crate::records::{basename, non_empty, Galley};
use crate::tree::Element;

/// The galleys of a publication split by role.
#[derive(Debug, Clone, Copy)]
pub struct GalleyRoles<'a> {
    /// The first galley, if any
    pub self_uri: Option<&'a Galley>,
    /// All galleys after the first, in order
    pub supplementary: &'a [Galley],
}

impl<'a> GalleyRoles<'a> {
    /// Splits galleys into the self-uri candidate and the rest.
    pub fn split(galleys: &'a [Galley]) -> Self {
        match galleys.split_first() {
            Some((first, rest)) => Self {
                self_uri: Some(first),
                supplementary: rest,
            },
            None => Self {
                self_uri: None,
                supplementary: &[],
            },
        }
    }
}

/// Where a galley points, once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleyTarget {
    /// A local file packaged alongside the document
    Local {
        /// Archive-relative path (`<article-id>/<basename>`)
        path: String,
        /// MIME type of the file
        mimetype: Option<String>,
    },
    /// A galley hosted elsewhere
    Remote {
        /// Remote URL
        url: String,
    },
}

impl GalleyTarget {
    /// The href of this target.
    pub fn href(&self) -> &str {
        match self {
            GalleyTarget::Local { path, .. } => path,
            GalleyTarget::Remote { url } => url,
        }
    }

    /// The MIME type, for local files only.
    pub fn mimetype(&self) -> Option<&str> {
        match self {
            GalleyTarget::Local { mimetype, .. } => non_empty(mimetype.as_deref()),
            GalleyTarget::Remote { .. } => None,
        }
    }
}

/// Returns the archive path of a stored file: `<article-id>/<basename>`.
pub fn archive_file_path(article_id: u64, storage_path: &str) -> Option<String> {
    basename(storage_path).map(|name| format!("{}/{}", article_id, name))
}

/// Resolves a galley to a local file, falling back to its remote URL.
pub fn resolve_galley<H: ExportHost + ?Sized>(
    galley: &Galley,
    article_id: u64,
    host: &H,
) -> Option<GalleyTarget> {
    let local = host.resolve_file(galley).and_then(|file| {
        archive_file_path(article_id, &file.path).map(|path| GalleyTarget::Local {
            path,
            mimetype: file.mimetype,
        })
    });

    local.or_else(|| {
        galley.remote_url().map(|url| GalleyTarget::Remote {
            url: url.to_string(),
        })
    })
}

/// Builds the `self-uri` element for the primary galley.
pub fn self_uri_element(target: &GalleyTarget, label: Option<&str>) -> Element {
    let mut node = Element::with_text("self-uri", target.href());
    node.set_attribute_opt("content-type", target.mimetype());
    node.set_attribute("xlink:href", target.href());
    node.set_attribute_opt("xlink:title", label);
    node
}

/// Builds a `supplementary-material` element for a secondary galley.
pub fn supplementary_element(target: &GalleyTarget, label: Option<&str>) -> Element {
    let mut node = Element::new("supplementary-material");
    node.set_attribute_opt("mimetype", target.mimetype());
    node.set_attribute("xlink:href", target.href());

    if let Some(label) = non_empty(label) {
        node.set_attribute("xlink:title", label);
        node.push(Element::new("caption").child(Element::with_text("p", label)));
    }
    node
}
