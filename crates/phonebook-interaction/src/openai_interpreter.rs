//! OpenAiInterpreter - Chat Completions implementation of the command
//! interpreter.
//!
//! Calls the OpenAI Chat Completions API directly over HTTP.
//! Configuration priority: ~/.config/phonebook/secret.json > environment
//! variables.

use async_trait::async_trait;
use phonebook_core::{Action, Command};
use phonebook_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

use crate::interpreter::{CommandInterpreter, InterpreterError};
use crate::prompt::system_prompt;
use crate::supported_models::SupportedModel;

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// One attempt per utterance; the timeout bounds worst-case latency when the
/// backend hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Interpreter implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiInterpreter {
    client: Client,
    api_key: String,
    model: SupportedModel,
}

impl OpenAiInterpreter {
    /// Creates a new interpreter with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: SupportedModel) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model,
        }
    }

    /// Loads configuration from ~/.config/phonebook/secret.json or
    /// environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/phonebook/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// The model defaults to `gpt-3.5-turbo`; a configured id outside the
    /// supported set is a configuration error, not a silent fallback.
    pub fn try_from_env() -> Result<Self, InterpreterError> {
        // Try loading from SecretStorage first
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(secret_config) = storage.load() {
                if let Some(openai_config) = secret_config.openai {
                    let model = parse_model(openai_config.model_name.as_deref())?;
                    return Ok(Self::new(openai_config.api_key, model));
                }
            }
        }

        // Fallback to environment variables
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            InterpreterError::Config(
                "OPENAI_API_KEY not found in ~/.config/phonebook/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = parse_model(env::var("OPENAI_MODEL_NAME").ok().as_deref())?;
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: SupportedModel) -> Self {
        self.model = model;
        self
    }

    /// Returns the model this interpreter sends requests with.
    pub fn model(&self) -> SupportedModel {
        self.model
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, InterpreterError> {
        let response = self
            .client
            .post(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| InterpreterError::Transport(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            InterpreterError::Transport(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CommandInterpreter for OpenAiInterpreter {
    async fn interpret(&self, utterance: &str) -> Result<Command, InterpreterError> {
        let request = ChatCompletionRequest {
            model: self.model.as_str().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: utterance.to_string(),
                },
            ],
        };

        let text = self.send_request(&request).await?;
        decode_command(&text)
    }
}

fn parse_model(id: Option<&str>) -> Result<SupportedModel, InterpreterError> {
    match id {
        None => Ok(SupportedModel::default()),
        Some(id) => SupportedModel::parse(id)
            .ok_or_else(|| InterpreterError::Config(format!("Unsupported model id: {id}"))),
    }
}

/// Decodes the backend's reply text into a command.
///
/// Code fences around the JSON object are tolerated. An out-of-vocabulary
/// action decodes to `Unknown`; the raw payload is logged here because this
/// is the last place it is visible.
fn decode_command(text: &str) -> Result<Command, InterpreterError> {
    let json = strip_code_fences(text);
    let command: Command = serde_json::from_str(json).map_err(|err| InterpreterError::Decode {
        message: err.to_string(),
        raw: text.to_string(),
    })?;

    if command.action == Action::Unknown {
        warn!(raw = %json, "backend returned an out-of-vocabulary action");
    }

    Ok(command)
}

/// Strips a surrounding markdown code fence, with or without a `json` tag.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, InterpreterError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(InterpreterError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> InterpreterError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    InterpreterError::Api {
        status: status.as_u16(),
        message,
        is_retryable,
    }
}
