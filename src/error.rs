/// Error taxonomy for the generation pipeline
///
/// Every boundary of the pipeline (encoding, transport, HTTP status,
/// response decoding) maps its failures onto one of these variants, and
/// the interaction layer renders them uniformly as a single error line.
/// Nothing here ever carries the credential: the client redacts it from
/// response bodies and transport messages before they reach an error.
use thiserror::Error;

/// A failed generation attempt.
///
/// `Clone` because errors ride inside iced messages from the background
/// task back to the UI thread.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StudioError {
    /// The user pressed Generate without supplying an API key.
    /// No request is issued.
    #[error("Please enter an API Key.")]
    MissingCredential,

    /// The user pressed Generate without uploading a product photo.
    /// The interaction layer treats the press as a no-op.
    #[error("Please upload a product image first.")]
    MissingImage,

    /// The uploaded raster could not be re-encoded to JPEG.
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// Network failure or timeout before any HTTP status was seen.
    #[error("Connection Error: {0}")]
    Transport(String),

    /// The service answered with a non-200 status. The body has the
    /// credential stripped.
    #[error("Service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response did not contain a recognizable candidate/part
    /// structure, or its embedded base64 could not be decoded.
    #[error("Unrecognized response at {path}: {detail}")]
    Decode { path: String, detail: String },
}

/// Strip the credential from text that may be echoed back to the user.
pub fn redact(credential: &str, text: &str) -> String {
    if credential.is_empty() {
        text.to_string()
    } else {
        text.replace(credential, "[redacted]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        assert_eq!(
            StudioError::MissingCredential.to_string(),
            "Please enter an API Key."
        );
    }

    #[test]
    fn test_http_error_carries_status_and_body() {
        let err = StudioError::Http {
            status: 400,
            body: r#"{"error":"bad request"}"#.to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("400"));
        assert!(rendered.contains("bad request"));
    }

    #[test]
    fn test_redact_removes_credential() {
        let out = redact("secret-key", "denied for key=secret-key (expired)");
        assert!(!out.contains("secret-key"));
        assert!(out.contains("[redacted]"));
    }

    #[test]
    fn test_redact_empty_credential_is_identity() {
        assert_eq!(redact("", "unchanged text"), "unchanged text");
    }
}
