//! Input classification
//!
//! Classification is attempted in a fixed precedence order: an existing,
//! readable file path wins over anything else, then a well-formed URL with a
//! scheme and host, then a `data:` URI, and finally literal text. A string
//! that fails to parse as a URL is simply not a URL; no error escapes this
//! module.

use ordbridge_domain::InputPayload;
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Classify an opaque input string into a payload variant.
///
/// Precedence is a policy choice: an input that is both an existing file
/// path and URL-shaped is always treated as a file.
pub fn classify(input: &str) -> InputPayload {
    let path = Path::new(input);
    if is_readable_file(path) {
        debug!(path = %input, "classified input as local file");
        return InputPayload::LocalFile(path.to_path_buf());
    }

    if let Ok(parsed) = Url::parse(input) {
        if parsed.has_host() {
            debug!(url = %input, "classified input as remote URL");
            return InputPayload::RemoteUrl(input.to_string());
        }
    }

    if let Some(rest) = input.strip_prefix("data:") {
        let (header, body) = rest.split_once(',').unwrap_or((rest, ""));
        let mime = header.split(';').next().unwrap_or("").trim();
        let mime = if mime.is_empty() { "text/plain" } else { mime };
        debug!(mime, "classified input as data URI");
        return InputPayload::DataUri {
            mime: mime.to_string(),
            body: body.to_string(),
        };
    }

    debug!("classified input as literal text");
    InputPayload::LiteralText(input.to_string())
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_existing_file_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "content").unwrap();
        let path = file.path().to_str().unwrap();

        match classify(path) {
            InputPayload::LocalFile(p) => assert_eq!(p, file.path()),
            other => panic!("expected LocalFile, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_not_a_file() {
        let result = classify("/nonexistent/path/to/file.png");
        assert!(!result.is_local());
    }

    #[test]
    fn test_url_with_scheme_and_host() {
        match classify("https://example.com/cat.png") {
            InputPayload::RemoteUrl(u) => assert_eq!(u, "https://example.com/cat.png"),
            other => panic!("expected RemoteUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_scheme_without_host_is_not_a_url() {
        // mailto: parses as a URL but has no host component
        match classify("mailto:someone@example.com") {
            InputPayload::LiteralText(_) => {}
            other => panic!("expected LiteralText, got {:?}", other),
        }
    }

    #[test]
    fn test_data_uri_split_at_first_comma() {
        match classify("data:image/png;base64,aGVsbG8=") {
            InputPayload::DataUri { mime, body } => {
                assert_eq!(mime, "image/png");
                assert_eq!(body, "aGVsbG8=");
            }
            other => panic!("expected DataUri, got {:?}", other),
        }
    }

    #[test]
    fn test_data_uri_body_may_contain_commas() {
        match classify("data:text/plain;base64,YQ==,extra") {
            InputPayload::DataUri { body, .. } => assert_eq!(body, "YQ==,extra"),
            other => panic!("expected DataUri, got {:?}", other),
        }
    }

    #[test]
    fn test_data_uri_without_mime_defaults_to_text_plain() {
        match classify("data:;base64,aGk=") {
            InputPayload::DataUri { mime, .. } => assert_eq!(mime, "text/plain"),
            other => panic!("expected DataUri, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_falls_through() {
        match classify("hello ordinals") {
            InputPayload::LiteralText(t) => assert_eq!(t, "hello ordinals"),
            other => panic!("expected LiteralText, got {:?}", other),
        }
    }

    #[test]
    fn test_file_precedence_over_url_shape() {
        // A file whose name is URL-shaped must still classify as a file
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("https:__example.com");
        std::fs::write(&path, b"x").unwrap();

        let result = classify(path.to_str().unwrap());
        assert!(result.is_local());
    }
}
