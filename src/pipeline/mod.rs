/// Generation pipeline
///
/// This module is the core of the studio: it takes the user's inputs,
/// encodes the product photo, composes the prompt, issues one request to
/// the generation service and decodes the answer. The interaction layer
/// only ever calls `run_generation` and renders whatever comes back.

pub mod client;
pub mod decoder;
pub mod encoder;
pub mod prompt;

use image::DynamicImage;

use crate::error::StudioError;
use client::GenerationClient;
use decoder::{decode_response, GenerationOutcome};
use encoder::encode_product_image;
use prompt::{compose_prompt, Category};

/// Everything needed for one generation attempt, snapshotted at the
/// moment the user presses Generate.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: DynamicImage,
    pub category: Category,
    pub instruction: String,
    pub credential: String,
}

/// Run one generation attempt end to end.
///
/// Guards first: no credential means no outbound request. Then encode,
/// compose, send, decode. Every failure maps to a `StudioError` variant;
/// nothing is retried.
pub async fn run_generation(request: GenerationRequest) -> Result<GenerationOutcome, StudioError> {
    run_generation_at(client::DEFAULT_ENDPOINT, request).await
}

async fn run_generation_at(
    endpoint: &str,
    request: GenerationRequest,
) -> Result<GenerationOutcome, StudioError> {
    if request.credential.trim().is_empty() {
        return Err(StudioError::MissingCredential);
    }

    let encoded = encode_product_image(&request.image)?;
    let prompt = compose_prompt(request.category, &request.instruction);

    let client = GenerationClient::with_endpoint(endpoint, &request.credential)?;
    let response = client.generate(&prompt, &encoded).await?;

    decode_response(response, encoded.mime_type)
}
