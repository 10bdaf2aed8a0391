//! SAX-style content handler interface
//!
//! A [`ContentHandler`] receives document events in order from the
//! streaming parser in [`crate::sax`]. No tree is built; a handler keeps
//! whatever state it needs between callbacks.

use crate::error::Result;

/// Attributes of a start tag, in document order
///
/// Names are raw qualified names as written in the markup (`x:weight`
/// stays `x:weight`), values are already unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.items.push((name.into(), value.into()));
    }

    /// Get an attribute value by qualified name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether an attribute with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the element has no attributes
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.push(k, v);
        }
        attrs
    }
}

/// Receiver of streaming document events
///
/// Every callback may fail; the first error aborts the parse and is
/// returned to the caller unchanged.
pub trait ContentHandler {
    /// Called once before any other event
    fn start_document(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once after the last event of a well-formed document
    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }

    /// An element start tag; `<a/>` arrives as a start followed by an end
    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()>;

    /// An element end tag
    fn end_element(&mut self, name: &str) -> Result<()>;

    /// A chunk of character data, possibly whitespace only
    fn characters(&mut self, content: &str) -> Result<()>;
}

impl<H: ContentHandler + ?Sized> ContentHandler for &mut H {
    fn start_document(&mut self) -> Result<()> {
        (**self).start_document()
    }

    fn end_document(&mut self) -> Result<()> {
        (**self).end_document()
    }

    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()> {
        (**self).start_element(name, attributes)
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        (**self).end_element(name)
    }

    fn characters(&mut self, content: &str) -> Result<()> {
        (**self).characters(content)
    }
}
