//! Schema document tree
//!
//! Parses an XML Schema file into an owned element tree that the
//! generator traverses. The schema vocabulary (complexType, simpleType,
//! group, element, attribute, sequence, restriction, enumeration,
//! pattern, annotation, documentation) is matched by local name, so
//! namespace prefixes are stripped during parsing.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A node in the parsed schema tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Local tag name, namespace prefix removed
    pub tag: String,
    /// Attributes, keyed by local name
    pub attributes: HashMap<String, String>,
    /// Raw text content; leading whitespace is significant for
    /// documentation blocks and must not be trimmed here
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Get an attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// The node's `name` attribute; absent for anonymous constructs
    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append raw text content
    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// All descendants in document order, not including self
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }
}

/// A parsed schema document
#[derive(Debug)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse a schema document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .map_err(|e| Error::Parse(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_string(&xml)
    }

    /// Parse a schema document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_reader(xml.as_bytes());

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else {
                        root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Parse(format!("failed to unescape text: {}", e)))?;
                        // Keep the raw text, indentation included, but drop
                        // the whitespace-only runs between child elements.
                        if !text.trim().is_empty() {
                            current.append_text(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Parse(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore comments, processing instructions, etc.
            }
            buf.clear();
        }

        let root = root.ok_or_else(|| Error::Parse("document has no root element".to_string()))?;
        Ok(Self { root })
    }

    /// Parse an element from a start or empty tag event
    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Parse(format!("invalid element name: {}", e)))?;

        let mut element = Element::new(local_name(name));

        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Parse(format!("failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Parse(format!("invalid attribute name: {}", e)))?;

            // Namespace declarations are not part of the data model here
            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            element
                .attributes
                .insert(local_name(attr_name).to_string(), attr_value);
        }

        Ok(element)
    }
}

/// Strip a namespace prefix from a tag or attribute name
fn local_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((_prefix, local)) => local,
        None => name,
    }
}
