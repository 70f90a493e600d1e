//! Inscription payload classification result
//!
//! The `data` argument accepted by the inscribe and image tools is an opaque
//! string. Classification resolves it to exactly one of these variants, in a
//! fixed precedence order (readable file first, then URL, then data URI,
//! otherwise literal text). The classifier itself lives in the
//! infrastructure layer because the file check touches the filesystem.

use std::path::PathBuf;

/// Classified form of an opaque input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPayload {
    /// An existing, readable file on the local filesystem.
    LocalFile(PathBuf),
    /// A remote resource to fetch over HTTP(S).
    RemoteUrl(String),
    /// An inline `data:` URI: MIME type plus base64 body.
    DataUri { mime: String, body: String },
    /// Anything else: opaque text, inscribed as `text/plain`.
    LiteralText(String),
}

impl InputPayload {
    /// Variant name for logging and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            InputPayload::LocalFile(_) => "file",
            InputPayload::RemoteUrl(_) => "url",
            InputPayload::DataUri { .. } => "data-uri",
            InputPayload::LiteralText(_) => "text",
        }
    }

    /// Whether staging this payload requires a network fetch.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, InputPayload::RemoteUrl(_))
    }

    /// Whether the payload already names a local file (staging is a no-op).
    pub fn is_local(&self) -> bool {
        matches!(self, InputPayload::LocalFile(_))
    }
}
