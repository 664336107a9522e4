//! XML output for nested data.
//!
//! This module turns a [`Map`](crate::core::value::Map) into an
//! [`XmlDocument`]. The implementation uses `quick-xml` for escaping and
//! rendering.
//!
//! # Features
//!
//! - Scalars become attributes, `null` becomes an empty element and the
//!   `"_"` key becomes the element's text
//! - Nested maps become child elements
//! - Lists of maps become repeated sibling elements named after the list key
//! - Element and attribute names are validated against the XML 1.0 `Name`
//!   production before anything is rendered
//!
//! # Examples
//!
//! ```
//! use support_rs::map;
//! use support_rs::xml::array_to_xml;
//!
//! let catalog = map! {
//!     "product" => vec![
//!         map! { "id" => "P001", "available" => true, "_" => "Wireless Headphones" },
//!         map! { "id" => "P002", "available" => false, "_" => "USB-C Cable" },
//!     ],
//! };
//!
//! let document = array_to_xml(&catalog, "catalog").unwrap();
//!
//! assert_eq!(document.root().children().len(), 2);
//! assert_eq!(document.root().children()[1].attribute("id"), Some("P002"));
//!
//! // <catalog>
//! //   <product id="P001" available="1">Wireless Headphones</product>
//! //   <product id="P002" available="">USB-C Cable</product>
//! // </catalog>
//! println!("{}", document);
//! ```

pub mod xml_document;
pub mod xml_serializer;

pub use xml_document::{is_valid_name, XmlDocument, XmlElement};
pub use xml_serializer::{array_to_xml, ArrayToXml, ArrayToXmlBuilder};
