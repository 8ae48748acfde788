//! Supported backend model ids.
//!
//! | Model ID | Tier | Notes |
//! |----------|------|-------|
//! | `gpt-3.5-turbo` | Fast | Cheapest, handles the command schema fine (default) |
//! | `gpt-4o-mini` | Balanced | Better with messy utterances |
//! | `o1-mini` | Reasoning | Overkill for this schema, kept for experiments |
//!
//! When adding a model, update this table, [`SupportedModel::parse`] and the
//! default constant in `openai_interpreter.rs` together.

use std::fmt;

/// The closed set of model ids the server will accept.
///
/// Per-request overrides are validated against this set; an id outside it is
/// rejected before any backend call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportedModel {
    #[default]
    Gpt35Turbo,
    Gpt4oMini,
    O1Mini,
}

impl SupportedModel {
    /// Returns the wire id sent to the Chat Completions API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedModel::Gpt35Turbo => "gpt-3.5-turbo",
            SupportedModel::Gpt4oMini => "gpt-4o-mini",
            SupportedModel::O1Mini => "o1-mini",
        }
    }

    /// Parses a wire id, returning `None` for unsupported models.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "gpt-3.5-turbo" => Some(SupportedModel::Gpt35Turbo),
            "gpt-4o-mini" => Some(SupportedModel::Gpt4oMini),
            "o1-mini" => Some(SupportedModel::O1Mini),
            _ => None,
        }
    }

    /// All supported models, default first.
    pub fn all() -> [SupportedModel; 3] {
        [
            SupportedModel::Gpt35Turbo,
            SupportedModel::Gpt4oMini,
            SupportedModel::O1Mini,
        ]
    }
}

impl fmt::Display for SupportedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_model() {
        for model in SupportedModel::all() {
            assert_eq!(SupportedModel::parse(model.as_str()), Some(model));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_ids() {
        assert_eq!(SupportedModel::parse("gpt-5"), None);
        assert_eq!(SupportedModel::parse(""), None);
    }

    #[test]
    fn test_default_is_gpt_35_turbo() {
        assert_eq!(SupportedModel::default().as_str(), "gpt-3.5-turbo");
        assert_eq!(SupportedModel::all()[0], SupportedModel::default());
    }
}
