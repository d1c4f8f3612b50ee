use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Quick-XML error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid escape in attribute value: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected <{expected}> as the root of the prior document, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("Prior document ended inside <{0}>")]
    UnexpectedEof(String),
}
