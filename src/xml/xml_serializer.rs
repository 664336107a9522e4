use log::{debug, trace};

use crate::core::value::{Key, Map, Scalar, Value};
use crate::error::Result;

use super::xml_document::{XmlDocument, XmlElement};

const DEFAULT_ROOT_TAG: &str = "xml";
const TEXT_KEY: &str = "_";

/// Converts a nested [`Map`] into an XML document.
///
/// Each entry of a map becomes one of three things on the current element:
///
/// - a scalar becomes an attribute, except `null` which becomes an empty
///   child element and the key `"_"` which becomes the element's text;
/// - a map becomes a child element named after its key;
/// - a list of maps (a map with a non-null entry at index `0`) becomes one
///   sibling element per list entry, all named after the list's key.
///
/// # Examples
///
/// ```
/// use support_rs::map;
/// use support_rs::xml::ArrayToXmlBuilder;
///
/// let data = map! {
///     "child" => vec![
///         map! { "name" => "chopin", "age" => 11 },
///         map! { "name" => "ngo", "age" => 10 },
///     ],
/// };
///
/// let serializer = ArrayToXmlBuilder::new().build();
/// let xml = serializer.serialize(&data).unwrap().to_xml().unwrap();
///
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <xml><child name=\"chopin\" age=\"11\"/><child name=\"ngo\" age=\"10\"/></xml>\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ArrayToXml {
    root_tag: String,
}

impl ArrayToXml {
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// Builds the document. Fails with
    /// [`SupportError::InvalidName`](crate::error::SupportError::InvalidName)
    /// as soon as a key cannot be used as an element or attribute name.
    pub fn serialize(&self, data: &Map) -> Result<XmlDocument> {
        debug!(
            "Serializing {} entries under <{}>",
            data.len(),
            self.root_tag
        );
        let mut root = XmlElement::new(&self.root_tag)?;
        append_entries(data, &mut root, None)?;
        Ok(XmlDocument::new(root))
    }
}

fn append_entries(data: &Map, target: &mut XmlElement, pending: Option<&str>) -> Result<()> {
    for (key, value) in data.iter() {
        match value {
            Value::Map(map) => append_map(key, map, target, pending)?,
            Value::Scalar(scalar) => append_scalar(key, scalar, target)?,
        }
    }
    Ok(())
}

fn append_map(key: &Key, map: &Map, target: &mut XmlElement, pending: Option<&str>) -> Result<()> {
    match pending {
        Some(name) if key.is_list_index() => {
            trace!("Appending list entry {} as <{}>", key, name);
            let child = target.add_child(name)?;
            append_entries(map, child, None)
        }
        _ if !map.is_indexed_list() => {
            let name = key.to_string();
            trace!("Appending <{}>", name);
            let child = target.add_child(&name)?;
            append_entries(map, child, None)
        }
        _ => append_entries(map, target, Some(&key.to_string())),
    }
}

fn append_scalar(key: &Key, scalar: &Scalar, target: &mut XmlElement) -> Result<()> {
    if key.as_name() == Some(TEXT_KEY) {
        target.set_text(&scalar.to_xml_string());
    } else if !scalar.is_null() {
        let name = key.to_string();
        if target.attribute(&name).is_some() {
            // Flattened list entries share the parent element; first value wins.
            debug!("Keeping existing attribute {} on <{}>", name, target.name());
        } else {
            target.add_attribute(&name, &scalar.to_xml_string())?;
        }
    } else {
        target.add_child(&key.to_string())?;
    }
    Ok(())
}

/// Builder for [`ArrayToXml`].
///
/// The root tag is trimmed; an empty or blank root tag falls back to `xml`.
///
/// ```
/// use support_rs::xml::ArrayToXmlBuilder;
///
/// assert_eq!(ArrayToXmlBuilder::new().root_tag(" catalog ").build().root_tag(), "catalog");
/// assert_eq!(ArrayToXmlBuilder::new().root_tag("   ").build().root_tag(), "xml");
/// ```
#[derive(Default)]
pub struct ArrayToXmlBuilder {
    root_tag: Option<String>,
}

impl ArrayToXmlBuilder {
    pub fn new() -> Self {
        Self { root_tag: None }
    }

    pub fn root_tag(mut self, root_tag: &str) -> Self {
        self.root_tag = Some(root_tag.to_string());
        self
    }

    pub fn build(self) -> ArrayToXml {
        let root_tag = self
            .root_tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_ROOT_TAG)
            .to_string();

        ArrayToXml { root_tag }
    }
}

/// Serializes `data` under `root` (trimmed, `xml` when blank).
pub fn array_to_xml(data: &Map, root: &str) -> Result<XmlDocument> {
    ArrayToXmlBuilder::new().root_tag(root).build().serialize(data)
}
