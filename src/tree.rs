//! A minimal owned XML element tree.
//!
//! The document builder assembles an [`Element`] tree first and the
//! [`writer`](crate::writer) serializes it afterwards. Elements hold either
//! text or child elements; the archival documents produced here never use
//! mixed content.
//!
//! The `*_opt` helpers carry the omission rule: an absent or empty value
//! produces no element and no attribute. Text and attribute values lose any
//! character XML 1.0 cannot represent on the way in, so every tree
//! serializes to a well-formed document.

use crate::records::{non_empty, xml_text};

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut elem = Self::new(name);
        elem.children.push(Node::Text(xml_text(text.into())));
        elem
    }

    /// Adds an attribute, builder style.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Adds a child element, builder style.
    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Sets an attribute, replacing an existing one of the same name.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = xml_text(value.into());
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Sets an attribute only if `value` is present and non-empty.
    pub fn set_attribute_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = non_empty(value).map(|v| xml_text(v.to_string())) {
            if !value.trim().is_empty() {
                self.set_attribute(key, value);
            }
        }
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Appends a child element if there is one.
    pub fn push_opt(&mut self, child: Option<Element>) {
        if let Some(child) = child {
            self.push(child);
        }
    }

    /// Appends `<name>value</name>` if `value` is present and non-empty.
    ///
    /// Returns whether an element was appended.
    pub fn push_text_opt(&mut self, name: &str, value: Option<&str>) -> bool {
        let value = non_empty(value)
            .map(|v| xml_text(v.to_string()))
            .filter(|v| !v.trim().is_empty());
        match value {
            Some(value) => {
                self.push(Element::with_text(name, value));
                true
            }
            None => false,
        }
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Looks up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All child nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Follows a `/`-separated path of child element names.
    pub fn find_path(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |elem, name| elem.find(name))
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Names of the child elements, in order.
    pub fn child_names(&self) -> Vec<&str> {
        self.elements().map(|e| e.name.as_str()).collect()
    }

    /// Returns true if the element has neither attributes nor children.
    ///
    /// Only structure counts: an element holding a blank text node is not
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Returns true if the element has no children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
