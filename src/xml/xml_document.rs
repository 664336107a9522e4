use crate::error::{NameKind, Result, SupportError};
use log::debug;
use quick_xml::{
    escape::{escape, partial_escape},
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// An element of the output tree.
///
/// Names are validated when the element or attribute is created, and
/// characters XML 1.0 does not allow are dropped from attribute values and
/// text, so a tree that was built successfully always renders to
/// well-formed XML.
///
/// # Examples
///
/// ```
/// use support_rs::xml::XmlElement;
///
/// let mut root = XmlElement::new("people").unwrap();
/// root.add_attribute("count", "1").unwrap();
/// root.add_child("person").unwrap().set_text("Alice");
///
/// assert_eq!(root.attribute("count"), Some("1"));
/// assert_eq!(root.child("person").and_then(|p| p.text()), Some("Alice"));
/// assert!(root.add_child("1st").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: Option<String>,
}

impl XmlElement {
    /// Creates an empty element, failing if `name` is not a valid XML name.
    pub fn new(name: &str) -> Result<Self> {
        validate_name(name, NameKind::Element)?;
        Ok(Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        })
    }

    /// Appends a new empty child and returns it.
    pub fn add_child(&mut self, name: &str) -> Result<&mut XmlElement> {
        let child = XmlElement::new(name)?;
        self.children.push(child);
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Appends an attribute. Attribute names are unique per element.
    pub fn add_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        validate_name(name, NameKind::Attribute)?;
        if self.attribute(name).is_some() {
            return Err(SupportError::DuplicateAttribute {
                element: self.name.clone(),
                name: name.to_string(),
            });
        }
        self.attributes.push((name.to_string(), xml_chars(value)));
        Ok(())
    }

    /// Replaces the text content of this element.
    pub fn set_text(&mut self, text: &str) {
        self.text = Some(xml_chars(text));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            let value = escape_attribute(value);
            start.push_attribute((name.as_bytes(), value.as_bytes()));
        }

        if self.children.is_empty() && self.text.is_none() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| SupportError::Render(format!("Failed to write XML element: {}", e)));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| SupportError::Render(format!("Failed to write XML element: {}", e)))?;

        if let Some(text) = &self.text {
            let escaped = partial_escape(text.as_str()).replace('\r', "&#13;");
            writer
                .write_event(Event::Text(BytesText::from_escaped(escaped)))
                .map_err(|e| SupportError::Render(format!("Failed to write XML text: {}", e)))?;
        }

        for child in &self.children {
            child.write(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| SupportError::Render(format!("Failed to write XML end: {}", e)))?;
        Ok(())
    }
}

/// A complete XML document: the `version="1.0"` / `encoding="UTF-8"`
/// declaration followed by a single root element.
///
/// # Examples
///
/// ```
/// use support_rs::xml::{XmlDocument, XmlElement};
///
/// let mut root = XmlElement::new("xml").unwrap();
/// root.add_child("child").unwrap().add_attribute("name", "chopin").unwrap();
///
/// let document = XmlDocument::new(root);
/// assert_eq!(
///     document.to_xml().unwrap(),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xml><child name=\"chopin\"/></xml>\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn into_root(self) -> XmlElement {
        self.root
    }

    /// Renders the document: declaration line, compact root element and a
    /// trailing newline.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| SupportError::Render(format!("Failed to write XML declaration: {}", e)))?;
        writer.get_mut().push(b'\n');
        self.root.write(&mut writer)?;
        writer.get_mut().push(b'\n');

        String::from_utf8(writer.into_inner())
            .map_err(|e| SupportError::Render(format!("Rendered XML is not UTF-8: {}", e)))
    }

    /// Writes the rendered document to `wtr` and flushes it.
    pub fn write_to<W: Write>(&self, mut wtr: W) -> Result<()> {
        let xml = self.to_xml()?;
        wtr.write_all(xml.as_bytes())?;
        wtr.flush()?;
        Ok(())
    }

    /// Writes the rendered document to a file, creating or truncating it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

/// Entity escaping plus character references for whitespace that attribute
/// value normalization would otherwise turn into spaces.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

/// Drops characters outside the XML 1.0 `Char` production.
fn xml_chars(value: &str) -> String {
    if value.chars().all(is_xml_char) {
        return value.to_string();
    }
    debug!("Dropping characters not allowed in XML from {:?}", value);
    value.chars().filter(|c| is_xml_char(*c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn validate_name(name: &str, kind: NameKind) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(SupportError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

/// XML 1.0 `Name` production.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}
