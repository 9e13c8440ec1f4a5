//! Gemini adapter configuration.

use serde::Deserialize;

/// Connection settings for the Gemini generateContent API.
///
/// Every field has a default so the `[gemini]` config section is
/// optional; only the API key must be supplied for real calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key passed as the `key` query parameter.
    pub api_key: String,
    /// Model identifier (e.g. `gemini-2.0-flash`).
    pub model: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}
