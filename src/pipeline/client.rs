/// HTTP client for the generation endpoint
///
/// One synchronous-from-the-user's-point-of-view POST per Generate
/// press: the composed prompt plus the encoded product image go out as a
/// single `generateContent` body, and the parsed response (or an error
/// descriptor) comes back. No retries; the user retries by pressing the
/// button again.
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

use crate::error::{redact, StudioError};
use crate::pipeline::decoder::GenerateResponse;
use crate::pipeline::encoder::EncodedImage;

/// Endpoint path identifies the model and the generation method.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Wall-clock limit on one generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for one session. Holds the credential in memory only; the
/// credential travels as the `key` query parameter and is stripped from
/// anything echoed back in errors.
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: String,
    credential: String,
}

impl GenerationClient {
    pub fn new(credential: impl Into<String>) -> Result<Self, StudioError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, credential)
    }

    /// Same client against a different endpoint (used by tests to point
    /// at a local stub server).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, StudioError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StudioError::Transport(e.to_string()))?;

        Ok(GenerationClient {
            http,
            endpoint: endpoint.into(),
            credential: credential.into(),
        })
    }

    /// Issue one generation request. On HTTP 200 the parsed response is
    /// returned; any non-200 becomes `StudioError::Http` with the status
    /// and the (credential-stripped) body; transport failures and the
    /// 60 s timeout become `StudioError::Transport`.
    pub async fn generate(
        &self,
        prompt: &str,
        image: &EncodedImage,
    ) -> Result<GenerateResponse, StudioError> {
        let url = format!("{}?key={}", self.endpoint, self.credential);
        let body = build_body(prompt, image);

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::Transport(redact(&self.credential, &e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::Http {
                status: status.as_u16(),
                body: redact(&self.credential, &body),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| StudioError::Transport(redact(&self.credential, &e.to_string())))?;

        serde_json::from_str(&text).map_err(|e| StudioError::Decode {
            path: "$".to_string(),
            detail: e.to_string(),
        })
    }
}

/// Build the outbound JSON body: exactly two parts, text first, then the
/// inline image, plus the fixed generation configuration.
pub fn build_body(prompt: &str, image: &EncodedImage) -> GenerateBody {
    GenerateBody {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.to_string(),
                        data: image.data.clone(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: 0.4,
            top_k: 32,
            top_p: 1,
            max_output_tokens: 2048,
        },
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateBody {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: u32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg",
            data: "aGVsbG8=".to_string(),
        }
    }

    #[test]
    fn test_body_has_exactly_two_parts_text_first() {
        let body = build_body("the prompt", &sample_image());
        let json = serde_json::to_value(&body).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 2);
        assert_eq!(parts[0]["text"], "the prompt");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
    }

    #[test]
    fn test_body_generation_config() {
        let body = build_body("p", &sample_image());
        let json = serde_json::to_value(&body).unwrap();

        let config = &json["generationConfig"];
        assert_eq!(config["temperature"], 0.4);
        assert_eq!(config["topK"], 32);
        assert_eq!(config["topP"], 1);
        assert_eq!(config["maxOutputTokens"], 2048);
    }

    #[tokio::test]
    async fn test_credential_sent_as_key_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(query_param("key", "K"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "maxOutputTokens": 2048 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GenerationClient::with_endpoint(format!("{}/generate", server.uri()), "K").unwrap();
        let response = client.generate("prompt", &sample_image()).await.unwrap();
        assert_eq!(response.candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_non_200_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"bad request"}"#),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::with_endpoint(server.uri(), "K").unwrap();
        let err = client.generate("p", &sample_image()).await.unwrap_err();
        match err {
            StudioError::Http { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad request"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_never_contains_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string("API key secret-key-123 is not authorized"),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::with_endpoint(server.uri(), "secret-key-123").unwrap();
        let err = client.generate("p", &sample_image()).await.unwrap_err();
        assert!(!err.to_string().contains("secret-key-123"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port.
        let client =
            GenerationClient::with_endpoint("http://127.0.0.1:9/generate", "K").unwrap();
        let err = client.generate("p", &sample_image()).await.unwrap_err();
        match err {
            StudioError::Transport(ref reason) => assert!(!reason.is_empty()),
            other => panic!("expected Transport error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Connection Error"));
    }

    #[tokio::test]
    async fn test_non_json_200_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = GenerationClient::with_endpoint(server.uri(), "K").unwrap();
        let err = client.generate("p", &sample_image()).await.unwrap_err();
        assert!(matches!(err, StudioError::Decode { .. }));
    }
}
