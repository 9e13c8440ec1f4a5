//! # workmate-adapter-gemini
//!
//! Outbound adapter implementing the [`TextGenerator`] port against the
//! Gemini `generateContent` API.
//!
//! The core only depends on "send prompt, get back one text blob"; this
//! adapter owns the wire shapes, the API-key plumbing, and the mapping of
//! transport failures into [`UpstreamError`] variants. Whatever text the
//! model produced is returned untouched; making sense of it is the
//! application layer's problem.
//!
//! ## Dependency rule
//! Depends on `workmate-app` (port traits) and `workmate-domain` only.

mod config;

pub use config::Config;

use serde::{Deserialize, Serialize};

use workmate_app::ports::{Sampling, TextGenerator};
use workmate_domain::error::{UpstreamError, WorkmateError};

/// HTTP client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    config: Config,
}

impl GeminiClient {
    /// Create a client from connection settings.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, sampling: &Sampling) -> Result<String, WorkmateError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig::from(sampling),
        };

        tracing::debug!(model = %self.config.model, "calling text-generation service");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()).into());
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        extract_text(payload).ok_or_else(|| UpstreamError::EmptyResponse.into())
    }
}

/// First non-blank text part of the first candidate, if any.
fn extract_text(payload: GenerateResponse) -> Option<String> {
    payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
}

// Wire shapes for the generateContent request/response.

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<&Sampling> for GenerationConfig {
    fn from(sampling: &Sampling) -> Self {
        Self {
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            max_output_tokens: sampling.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
