use std::path::PathBuf;

use thiserror::Error;

/// Defines errors that may occur while reading or writing TS documents.
#[derive(Error, Debug)]
pub enum TsError {
    /// Error when the catalog file cannot be read from disk
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed XML reported by the underlying parser
    #[error("XML error at byte {offset}: {source}")]
    Xml {
        offset: usize,
        #[source]
        source: quick_xml::Error,
    },
    /// Malformed attribute syntax
    #[error("malformed attribute at byte {offset}: {source}")]
    Attribute {
        offset: usize,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },
    /// A recognized element in a place the TS schema does not allow
    #[error("unexpected <{element}> at byte {offset}")]
    UnexpectedElement { element: String, offset: usize },
    /// Text content outside of any text-bearing element
    #[error("unexpected text content at byte {offset}")]
    UnexpectedText { offset: usize },
    /// A `<context>` that closed without a `<name>` child
    #[error("<context> without a <name> at byte {offset}")]
    MissingContextName { offset: usize },
    /// The document ended without a `<TS>` root element
    #[error("document has no <TS> root element")]
    MissingRoot,
    /// The document ended inside an unclosed element
    #[error("unexpected end of document at byte {offset}")]
    UnexpectedEof { offset: usize },
    /// Error when serializing a document back to XML
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}
