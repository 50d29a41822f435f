//! An owned element tree for formatting documents.
//!
//! Documents are read with `roxmltree` and written with `quick-xml`. The tree
//! keeps attribute order and the source position of every element so that load
//! errors can point at the offending element.

use crate::error::{ConfigError, Location};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// One item of element content.
#[derive(Debug, Clone)]
pub enum ConfigContent {
    Element(ConfigNode),
    /// Non-blank character data, trimmed.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ConfigNode {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<ConfigContent>,
    location: Location,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Vec::new(),
            location: Location::default(),
        }
    }

    /// Parses an XML document and returns its root element.
    pub fn parse(source: &str) -> Result<ConfigNode, ConfigError> {
        let doc = roxmltree::Document::parse(source)?;
        Ok(Self::from_xml_node(&doc, doc.root_element()))
    }

    fn from_xml_node(doc: &roxmltree::Document<'_>, node: roxmltree::Node<'_, '_>) -> ConfigNode {
        let mut out = ConfigNode::new(node.tag_name().name());
        out.location = doc.text_pos_at(node.range().start).into();
        out.attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        for child in node.children() {
            if child.is_element() {
                out.content
                    .push(ConfigContent::Element(Self::from_xml_node(doc, child)));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default().trim();
                if !text.is_empty() {
                    out.content.push(ConfigContent::Text(text.to_string()));
                }
            }
        }
        out
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets an attribute, replacing any existing value under the same name.
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn content(&self) -> &[ConfigContent] {
        &self.content
    }

    pub fn elements(&self) -> impl Iterator<Item = &ConfigNode> {
        self.content.iter().filter_map(|c| match c {
            ConfigContent::Element(e) => Some(e),
            ConfigContent::Text(_) => None,
        })
    }

    /// The first child element called `name`.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.elements().find(|e| e.name == name)
    }

    /// The element's own character data, or `None` if it has none.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|c| match c {
                ConfigContent::Text(t) => Some(t.as_str()),
                ConfigContent::Element(_) => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Appends a child element and returns it for further population.
    pub fn push_element(&mut self, element: ConfigNode) -> &mut ConfigNode {
        self.content.push(ConfigContent::Element(element));
        match self.content.last_mut() {
            Some(ConfigContent::Element(e)) => e,
            _ => unreachable!("element was just pushed"),
        }
    }

    pub fn push_content(&mut self, item: ConfigContent) {
        self.content.push(item);
    }

    /// Consumes the element, returning its content items.
    pub fn into_content(self) -> Vec<ConfigContent> {
        self.content
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.content.push(ConfigContent::Text(text.into()));
    }

    /// Appends `<name>text</name>`.
    pub fn push_text_element(&mut self, name: &str, text: impl Into<String>) {
        self.push_element(ConfigNode::new(name)).push_text(text);
    }

    /// Serializes the tree as an indented XML document.
    pub fn to_xml_string(&self) -> Result<String, ConfigError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| ConfigError::XmlWrite(e.to_string()))
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), ConfigError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (k, v) in &self.attributes {
            start.push_attribute((k.as_str(), v.as_str()));
        }

        if self.content.is_empty() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        for item in &self.content {
            match item {
                ConfigContent::Element(e) => e.write(writer)?,
                ConfigContent::Text(t) => write_event(writer, Event::Text(BytesText::new(t)))?,
            }
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ConfigError> {
    writer
        .write_event(event)
        .map_err(|e| ConfigError::XmlWrite(e.to_string()))
}
