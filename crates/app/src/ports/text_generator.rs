//! Text-generation port: the outbound boundary to the language model service.

use std::future::Future;

use workmate_domain::error::WorkmateError;

/// Sampling parameters forwarded with every generation request.
///
/// The defaults lean deterministic: bounded output length, moderate
/// randomness.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// Sends a prompt to the external text-generation service and returns the
/// single text blob it produced.
///
/// The blob may be well-formed JSON, fenced JSON, or free-form prose; the
/// caller is responsible for making sense of it. Implementations report
/// only transport-level failures.
pub trait TextGenerator {
    /// Run one prompt through the service.
    fn generate(
        &self,
        prompt: &str,
        sampling: &Sampling,
    ) -> impl Future<Output = Result<String, WorkmateError>> + Send;
}

impl<T: TextGenerator + Send + Sync> TextGenerator for std::sync::Arc<T> {
    fn generate(
        &self,
        prompt: &str,
        sampling: &Sampling,
    ) -> impl Future<Output = Result<String, WorkmateError>> + Send {
        (**self).generate(prompt, sampling)
    }
}
