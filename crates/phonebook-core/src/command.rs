//! Command domain model produced by the interpreter.
//!
//! A `Command` is the structured form of one user utterance. It is produced
//! once by the interpreter and consumed once by the executor. The only
//! command that outlives its request is a `Delete` parked in the pending
//! slot while the user is asked to confirm.

use serde::{Deserialize, Serialize};

/// Reserved name value meaning "every contact" for a read command.
///
/// The deliberately unnatural spelling keeps the sentinel from colliding
/// with a real contact name.
pub const NAME_ALL: &str = "A-L-L";

/// The closed set of actions the interpreter may emit.
///
/// Wire values match the prompt contract: `create`, `read`, `update`,
/// `delete`, `yes` (confirm), `no` (cancel). Anything else decodes to
/// [`Action::Unknown`] rather than failing the whole response, so the
/// executor can answer "Unknown command" instead of crashing on an
/// out-of-vocabulary reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    #[serde(rename = "yes")]
    Confirm,
    #[serde(rename = "no")]
    Cancel,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Returns the wire representation used in the prompt contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Confirm => "yes",
            Action::Cancel => "no",
            Action::Unknown => "",
        }
    }
}

/// Structured representation of one user utterance.
///
/// Empty `name`/`phone` means "field not specified". `message` is the
/// backend-authored reply prefix (or, for a delete, the confirmation
/// question) and is passed through to the user verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl Command {
    /// True when the read target is the A-L-L sentinel.
    pub fn is_read_all(&self) -> bool {
        self.action == Action::Read && self.name == NAME_ALL
    }

    /// True when at least one lookup field is present.
    pub fn has_target(&self) -> bool {
        !self.name.is_empty() || !self.phone.is_empty()
    }
}
