//! All error types for the strings-import crate.
//!
//! These are returned from all fallible operations (parsing, pattern compilation,
//! configuration loading and the import pipeline).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("import of language `{language}` failed: {source}")]
    Import {
        language: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a new pattern error for the given regex source.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Wraps an error with the language whose import produced it.
    pub fn import_error(language: impl Into<String>, source: Error) -> Self {
        Error::Import {
            language: language.into(),
            source: Box::new(source),
        }
    }
}
