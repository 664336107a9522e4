use std::fmt;

use thiserror::Error;

/// Which kind of XML name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Element,
    Attribute,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Element => f.write_str("element"),
            NameKind::Attribute => f.write_str("attribute"),
        }
    }
}

#[derive(Error, Debug)]
/// Support error
pub enum SupportError {
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: NameKind, name: String },

    #[error("Attribute {name:?} already exists on element <{element}>")]
    DuplicateAttribute { element: String, name: String },

    #[error("XmlRender from: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SupportError>;
