//! Command interpreter trait and error type.

use async_trait::async_trait;
use phonebook_core::Command;
use thiserror::Error;

/// Errors that can occur while turning an utterance into a command.
///
/// Transport, API and decode failures are distinct variants so they can be
/// logged precisely; the executor collapses all of them into a single
/// interpretation-failure response at its boundary.
#[derive(Error, Debug)]
pub enum InterpreterError {
    /// Request never reached the backend (connect failure, timeout).
    #[error("Backend request failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success HTTP status.
    ///
    /// `is_retryable` classifies 429/5xx so a retry layer can be added
    /// without reshaping the error. No retry is performed here.
    #[error("Backend returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        is_retryable: bool,
    },

    /// Backend reply contained no text content.
    #[error("Backend returned no content in the response")]
    EmptyResponse,

    /// Reply text did not decode as a command-shaped JSON object.
    ///
    /// `raw` preserves the offending reply for logging; it must never be
    /// echoed back to the user.
    #[error("Failed to decode command: {message}")]
    Decode { message: String, raw: String },

    /// Missing or invalid interpreter configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InterpreterError {
    /// Check if a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

/// Translates one raw natural-language utterance into a structured command.
///
/// Implementations receive a non-empty trimmed utterance; the caller
/// short-circuits blank input before this trait is reached. One attempt per
/// utterance, no retry.
#[async_trait]
pub trait CommandInterpreter: Send + Sync {
    async fn interpret(&self, utterance: &str) -> Result<Command, InterpreterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(InterpreterError::Transport("timed out".into()).is_retryable());
        assert!(
            InterpreterError::Api {
                status: 429,
                message: "rate limited".into(),
                is_retryable: true,
            }
            .is_retryable()
        );
        assert!(
            !InterpreterError::Api {
                status: 401,
                message: "bad key".into(),
                is_retryable: false,
            }
            .is_retryable()
        );
        assert!(
            !InterpreterError::Decode {
                message: "expected value".into(),
                raw: "not json".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_decode_error_display_omits_raw_payload() {
        let err = InterpreterError::Decode {
            message: "expected value at line 1".into(),
            raw: "sorry, I can't do that".into(),
        };
        assert!(!err.to_string().contains("sorry"));
    }
}
