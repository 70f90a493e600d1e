//! Payload staging into invocation-scoped temporary files
//!
//! Every payload that is not already a local file is materialized under a
//! freshly created temporary directory. The directory is owned by the
//! [`Staged`] value and removed when it is dropped, so cleanup holds on
//! every exit path, including errors raised after partial staging.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ordbridge_domain::InputPayload;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Errors raised while resolving a payload to a local file.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} returned '{content_type}', expected {expected} content")]
    WrongContentType {
        url: String,
        content_type: String,
        expected: String,
    },

    #[error("Malformed base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Staging I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StageError> for ordbridge_domain::ToolError {
    fn from(e: StageError) -> Self {
        use ordbridge_domain::ToolError;
        match &e {
            StageError::Fetch { .. } | StageError::WrongContentType { .. } => {
                ToolError::fetch_error(e.to_string())
            }
            StageError::Decode(_) => ToolError::decode_error(e.to_string()),
            StageError::Io(_) => ToolError::execution_failed(e.to_string()),
        }
    }
}

/// Map a declared MIME type to a file extension. Unknown types map to a
/// generic binary extension.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        "text/plain" => ".txt",
        "application/json" => ".json",
        "application/pdf" => ".pdf",
        "audio/mpeg" => ".mp3",
        "video/mp4" => ".mp4",
        _ => ".bin",
    }
}

/// A payload resolved to a local path.
///
/// The temporary variant owns its directory; dropping the value removes the
/// directory and everything staged inside it.
#[derive(Debug)]
pub enum Staged {
    /// Input was already a readable local file; nothing to clean up.
    Existing(PathBuf),
    /// Bytes written under a per-invocation temporary directory.
    Temp { dir: TempDir, path: PathBuf },
}

impl Staged {
    pub fn path(&self) -> &Path {
        match self {
            Staged::Existing(path) => path,
            Staged::Temp { path, .. } => path,
        }
    }

    /// Whether this invocation owns a temporary directory.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Staged::Temp { .. })
    }
}

/// Resolves payloads to staged local files.
pub struct Stager {
    client: reqwest::Client,
    user_agent: String,
}

impl Stager {
    /// The client is expected to carry the fetch timeout.
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Stage a payload, returning a local path the wallet tool can read.
    ///
    /// `expected_class` restricts the declared content type of remote
    /// fetches (e.g. `Some("image")` requires an `image/*` response).
    /// Local files pass through untouched.
    pub async fn stage(
        &self,
        payload: InputPayload,
        expected_class: Option<&str>,
    ) -> Result<Staged, StageError> {
        match payload {
            InputPayload::LocalFile(path) => Ok(Staged::Existing(path)),
            InputPayload::RemoteUrl(url) => self.fetch(&url, expected_class).await,
            InputPayload::DataUri { mime, body } => write_decoded(&mime, &body),
            InputPayload::LiteralText(text) => {
                // Literal text travels as a synthetic text/plain data URI
                let body = BASE64.encode(text.as_bytes());
                write_decoded("text/plain", &body)
            }
        }
    }

    async fn fetch(&self, url: &str, expected_class: Option<&str>) -> Result<Staged, StageError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| StageError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StageError::Fetch {
                url: url.to_string(),
                reason: format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if let Some(expected) = expected_class {
            if !content_type_matches(&content_type, expected) {
                return Err(StageError::WrongContentType {
                    url: url.to_string(),
                    content_type,
                    expected: expected.to_string(),
                });
            }
        }

        let bytes = response.bytes().await.map_err(|e| StageError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let staged = write_bytes(&bytes, extension_for_mime(&content_type))?;
        info!(url, path = %staged.path().display(), bytes = bytes.len(), "fetched remote payload");
        Ok(staged)
    }
}

/// Whether a declared content type belongs to the expected class
/// (e.g. "image/png" matches "image").
fn content_type_matches(content_type: &str, expected_class: &str) -> bool {
    content_type
        .strip_prefix(expected_class)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn write_decoded(mime: &str, body: &str) -> Result<Staged, StageError> {
    // Decode fully before touching the filesystem: malformed base64 never
    // leaves a partial file behind.
    let bytes = BASE64.decode(body.trim())?;
    let staged = write_bytes(&bytes, extension_for_mime(mime))?;
    info!(mime, path = %staged.path().display(), bytes = bytes.len(), "staged decoded payload");
    Ok(staged)
}

fn write_bytes(bytes: &[u8], extension: &str) -> Result<Staged, StageError> {
    let dir = TempDir::new()?;
    let path = dir.path().join(format!("{}{}", Uuid::new_v4(), extension));
    fs::write(&path, bytes)?;
    Ok(Staged::Temp { dir, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stager() -> Stager {
        Stager::new(reqwest::Client::new(), "Mozilla/5.0")
    }

    #[tokio::test]
    async fn test_local_file_passes_through() {
        let staged = stager()
            .stage(InputPayload::LocalFile("/tmp/already-there.png".into()), None)
            .await
            .unwrap();
        assert!(!staged.is_temporary());
        assert_eq!(staged.path(), Path::new("/tmp/already-there.png"));
    }

    #[tokio::test]
    async fn test_data_uri_decoded_length() {
        let payload = InputPayload::DataUri {
            mime: "text/plain".into(),
            body: BASE64.encode(b"hello ordinals"),
        };
        let staged = stager().stage(payload, None).await.unwrap();
        assert!(staged.is_temporary());
        let written = fs::read(staged.path()).unwrap();
        assert_eq!(written, b"hello ordinals");
        assert!(staged.path().to_string_lossy().ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_malformed_base64_yields_decode_error() {
        let payload = InputPayload::DataUri {
            mime: "image/png".into(),
            body: "not!valid!base64".into(),
        };
        let err = stager().stage(payload, None).await.unwrap_err();
        assert!(matches!(err, StageError::Decode(_)));
    }

    #[tokio::test]
    async fn test_literal_text_round_trip() {
        let text = "plain text to inscribe";
        let staged = stager()
            .stage(InputPayload::LiteralText(text.into()), None)
            .await
            .unwrap();
        let written = fs::read_to_string(staged.path()).unwrap();
        assert_eq!(written, text);
    }

    #[tokio::test]
    async fn test_temp_dir_removed_on_drop() {
        let staged = stager()
            .stage(InputPayload::LiteralText("ephemeral".into()), None)
            .await
            .unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_extension_table() {
        assert_eq!(extension_for_mime("image/jpeg"), ".jpg");
        assert_eq!(extension_for_mime("image/png"), ".png");
        assert_eq!(extension_for_mime("image/gif"), ".gif");
        assert_eq!(extension_for_mime("image/webp"), ".webp");
        assert_eq!(extension_for_mime("image/svg+xml"), ".svg");
        assert_eq!(extension_for_mime("text/plain"), ".txt");
        assert_eq!(extension_for_mime("application/json"), ".json");
        assert_eq!(extension_for_mime("application/pdf"), ".pdf");
        assert_eq!(extension_for_mime("audio/mpeg"), ".mp3");
        assert_eq!(extension_for_mime("video/mp4"), ".mp4");
        assert_eq!(extension_for_mime("application/octet-stream"), ".bin");
        assert_eq!(extension_for_mime("IMAGE/PNG"), ".png");
    }

    #[test]
    fn test_content_type_class_match() {
        assert!(content_type_matches("image/png", "image"));
        assert!(content_type_matches("image/svg+xml", "image"));
        assert!(!content_type_matches("text/html", "image"));
        assert!(!content_type_matches("imagery/fake", "image"));
    }
}
