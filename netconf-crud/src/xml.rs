//! Minimal XML element tree used for NETCONF payloads.
//!
//! NETCONF messages are small, fully buffered documents, so a plain owned
//! tree is enough. Lookups go by local name; namespace prefixes are kept in
//! `name` but ignored when matching.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::ModelError;

/// XML declaration prepended to every outgoing message.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// An owned XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified element name as written (may carry a prefix).
    pub name: String,

    /// Attributes in document order, including `xmlns` declarations.
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<XmlElement>,

    /// Text content (trimmed), if any.
    pub text: Option<String>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a leaf element holding `value` as text.
    pub fn leaf(name: impl Into<String>, value: impl Display) -> Self {
        Self {
            name: name.into(),
            text: Some(value.to_string()),
            ..Default::default()
        }
    }

    /// Add a default namespace declaration.
    pub fn with_namespace(self, namespace: &str) -> Self {
        self.with_attribute("xmlns", namespace)
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Append a child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Attribute value by local name (`operation` matches `nc:operation`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local_part(k) == name && !k.starts_with("xmlns"))
            .map(|(_, v)| v.as_str())
    }

    /// Default namespace declared on this element.
    pub fn namespace(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == "xmlns")
            .map(|(_, v)| v.as_str())
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// Text of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text())
    }

    /// Serialize this element (without an XML declaration).
    pub fn to_xml(&self) -> Result<String, ModelError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), ModelError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start)).map_err(xml_error)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(xml_error)?;
        if let Some(ref text) = self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(xml_error)?;
        Ok(())
    }

    /// Parse a document and return its root element.
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ModelError::Xml("unbalanced end tag".to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text.unescape().map_err(xml_error)?;
                        current.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => {
                    return Err(ModelError::Xml("unexpected end of document".to_string()));
                }
                _ => {}
            }
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, ModelError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn xml_error(e: impl Display) -> ModelError {
    ModelError::Xml(e.to_string())
}
