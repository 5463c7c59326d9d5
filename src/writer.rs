//! JATS writer for serializing element trees to XML.
//!
//! This module serializes a built document tree as UTF-8 XML with the XML
//! declaration and the fixed JATS Archiving 1.2 DOCTYPE.
//!
//! # Example
//!
//! ```rust
//! use jats_export::tree::Element;
//! use jats_export::writer::JatsWriter;
//!
//! let root = Element::new("article").child(Element::new("front"));
//!
//! let writer = JatsWriter::new();
//! let xml = writer.write_to_string(&root).unwrap();
//! assert!(xml.contains("<!DOCTYPE article PUBLIC"));
//! ```

use crate::error::{Error, Result};
use crate::records::{JATS_DTD_ID, JATS_DTD_URL, JATS_ROOT};
use crate::tree::{Element, Node};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Configuration options for the JATS writer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WriterConfig {
    /// Whether to indent the output for readability
    pub indent: bool,
    /// Indentation string (default: two spaces)
    ///
    /// Must repeat a single ASCII character, such as `"  "` or `"\t"`;
    /// anything else is rejected when writing.
    pub indent_string: String,
    /// Whether to include the XML declaration
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: true,
            indent_string: "  ".to_string(),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration (no indentation).
    pub fn compact() -> Self {
        Self {
            indent: false,
            indent_string: String::new(),
            xml_declaration: true,
        }
    }

    /// Sets whether to indent the output.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string.
    pub fn with_indent_string(mut self, s: impl Into<String>) -> Self {
        self.indent_string = s.into();
        self
    }

    /// The indentation character and its repeat count, if indenting.
    fn indent_unit(&self) -> Result<Option<(u8, usize)>> {
        if !self.indent || self.indent_string.is_empty() {
            return Ok(None);
        }
        let bytes = self.indent_string.as_bytes();
        let first = bytes[0];
        if !first.is_ascii() || bytes.iter().any(|&b| b != first) {
            return Err(Error::Config(format!(
                "indent string {:?} is not a single repeated ASCII character",
                self.indent_string
            )));
        }
        Ok(Some((first, bytes.len())))
    }
}

/// JATS XML writer.
#[derive(Debug, Clone, Default)]
pub struct JatsWriter {
    config: WriterConfig,
}

impl JatsWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes a document tree to a string.
    pub fn write_to_string(&self, root: &Element) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(root, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Writes a document tree to any Write implementation.
    pub fn write<W: Write>(&self, root: &Element, writer: W) -> Result<()> {
        let mut xml_writer = match self.config.indent_unit()? {
            Some((indent_char, size)) => Writer::new_with_indent(writer, indent_char, size),
            None => Writer::new(writer),
        };

        if self.config.xml_declaration {
            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let doctype = format!(
            r#"{} PUBLIC "{}" "{}""#,
            JATS_ROOT, JATS_DTD_ID, JATS_DTD_URL
        );
        xml_writer.write_event(Event::DocType(BytesText::from_escaped(doctype)))?;

        self.write_element(&mut xml_writer, root)?;

        if self.config.indent {
            xml_writer.get_mut().write_all(b"\n")?;
        }

        Ok(())
    }

    /// Writes an element and its subtree.
    fn write_element<W: Write>(&self, writer: &mut Writer<W>, elem: &Element) -> Result<()> {
        let mut start = BytesStart::new(elem.name());
        for (key, value) in elem.attributes() {
            start.push_attribute((key, value));
        }

        if !elem.has_children() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for node in elem.nodes() {
            match node {
                Node::Element(child) => self.write_element(writer, child)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(elem.name())))?;
        Ok(())
    }
}

/// Convenience function to write a document tree to a string.
pub fn to_string(root: &Element) -> Result<String> {
    JatsWriter::new().write_to_string(root)
}

/// Convenience function to write a document tree to a string without indentation.
pub fn to_string_compact(root: &Element) -> Result<String> {
    JatsWriter::with_config(WriterConfig::compact()).write_to_string(root)
}
