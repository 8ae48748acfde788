//! The system-prompt contract for the command backend.
//!
//! The backend's behavior is entirely prompt-driven: there is no programmatic
//! validation beyond JSON shape, so this text is a versioned contract, not a
//! free-text hint. Any change to the action vocabulary, the `A-L-L` sentinel
//! or the confirmation etiquette is a contract change and must bump
//! [`PROMPT_VERSION`].

use once_cell::sync::Lazy;
use phonebook_core::{Action, NAME_ALL};

/// Version of the prompt contract. Bump on any semantic change.
pub const PROMPT_VERSION: &str = "1";

static SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"You are a digital phone book assistant.
When the user asks to delete a contact, always ask for confirmation ("Are you sure you want to delete X? (yes/no)").
Only delete the contact if the user replies "yes". If the user replies "no", do nothing.

Convert user commands to JSON with EXACTLY these fields:
{{
  "action": "{create}|{read}|{update}|{delete}|{confirm}|{cancel}",
  "name": "string|{all}",
  "phone": "string (optional)",
  "message": "string"
}}

If a user asks for all contacts, the output should be:
Output: {{"action":"{read}", "name":"{all}", "message":""}}

Examples:
User: "Yes"
Output: {{"action":"{confirm}","name":"John", "message":""}}

User: "Add John with number 123456789"
Output: {{"action":"{create}","name":"John","phone":"123456789", "message":"Added John's number: "}}

User: "What's Joanna's number?"
Output: {{"action":"{read}","name":"Joanna","phone":"", "message":"Joanna's number is: "}}

User: "Whos's number is it? 888777555"
Output: {{"action":"{read}","name":"","phone":"888777555", "message":"The number belongs to: "}}

User: "Mark's new number is 111222333?"
Output: {{"action":"{update}","name":"Mark", "phone":"111222333", "message":"Changed Mark's number: "}}

User: "Remove John's number please"
Output: {{"action":"{delete}","name":"John","phone":"", "message":"Are you sure you want to delete John's number? (yes/no)"}}

Respond ONLY with valid JSON. No extra text."#,
        create = Action::Create.as_str(),
        read = Action::Read.as_str(),
        update = Action::Update.as_str(),
        delete = Action::Delete.as_str(),
        confirm = Action::Confirm.as_str(),
        cancel = Action::Cancel.as_str(),
        all = NAME_ALL,
    )
});

/// Returns the rendered system prompt.
///
/// Action names are interpolated from [`Action::as_str`] so the prompt can
/// never drift from the wire enum.
pub fn system_prompt() -> &'static str {
    &SYSTEM_PROMPT
}
