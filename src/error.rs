//! Fatal errors. Anything in here aborts the whole run before output is written.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid XML in '{}': {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("This XML is not a valid music font: {0}")]
    InvalidFontDocument(String),

    #[error("the glyph {{{0}}} from the white list is not defined in glyphnames.json")]
    UnknownWhitelistedGlyph(String),

    #[error("Malformed codepoint '{0}', expected U+XXXX")]
    MalformedCodepoint(String),

    #[error("Failed to serialize the glyph dictionary: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
