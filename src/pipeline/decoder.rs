/// Response decoding
///
/// The service may answer a generation request with inline image data or
/// with plain text (the underlying model is text-first; image output is
/// tier-dependent), so both are first-class outcomes here. Only the
/// first candidate's first part is inspected: the surface shows a single
/// image, multi-candidate responses are intentionally unsupported.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::StudioError;

/// What a completed generation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The service produced an image.
    Image { bytes: Vec<u8>, mime_type: String },
    /// The service replied with text in place of an image.
    Text(String),
}

/// Parsed `generateContent` response. Both `inlineData` and
/// `inline_data` spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseInlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Resolve a parsed response to an outcome.
///
/// `fallback_mime` is the request's mime-type, used when the response
/// part does not report one. A response with no recognizable
/// candidate/part structure yields `StudioError::Decode` naming the path
/// at which resolution failed.
pub fn decode_response(
    response: GenerateResponse,
    fallback_mime: &str,
) -> Result<GenerationOutcome, StudioError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| decode_error("candidates[0]", "no candidates in response"))?;

    let content = candidate
        .content
        .ok_or_else(|| decode_error("candidates[0].content", "candidate has no content"))?;

    let part = content
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| decode_error("candidates[0].content.parts[0]", "content has no parts"))?;

    if let Some(inline) = part.inline_data {
        let bytes = BASE64.decode(&inline.data).map_err(|e| {
            decode_error("candidates[0].content.parts[0].inline_data.data", &e.to_string())
        })?;
        return Ok(GenerationOutcome::Image {
            bytes,
            mime_type: inline.mime_type.unwrap_or_else(|| fallback_mime.to_string()),
        });
    }

    if let Some(text) = part.text {
        return Ok(GenerationOutcome::Text(text));
    }

    Err(decode_error(
        "candidates[0].content.parts[0]",
        "part carries neither inline_data nor text",
    ))
}

fn decode_error(path: &str, detail: &str) -> StudioError {
    StudioError::Decode {
        path: path.to_string(),
        detail: detail.to_string(),
    }
}
