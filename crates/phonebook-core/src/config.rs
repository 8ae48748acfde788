//! Secret configuration models.
//!
//! Decoded from `~/.config/phonebook/secret.json` by the infrastructure
//! layer. Environment variables are the fallback; see the interpreter's
//! `try_from_env`.

use serde::Deserialize;

/// Root structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
