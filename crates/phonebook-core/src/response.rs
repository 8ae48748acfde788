//! Response model returned to the transport layer.

use serde::{Deserialize, Serialize};

use crate::contact::Contact;

/// The structured reply for one query.
///
/// Exactly one of `error`/`message` carries text; `contacts`/`has_contacts`
/// are populated only for a read-all. The all-empty value is the no-op reply
/// for blank input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub has_contacts: bool,
}

impl Response {
    /// The empty no-op reply (blank input short-circuit).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A success reply carrying a message.
    pub fn message(message: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    /// An error reply.
    pub fn error(error: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    /// A read-all reply carrying the full contact list.
    ///
    /// `has_contacts` is set even for an empty list: zero contacts renders
    /// as an empty listing, never as an error.
    pub fn contacts(contacts: Vec<Contact>, query: impl Into<String>) -> Self {
        Self {
            contacts,
            has_contacts: true,
            query: query.into(),
            ..Self::default()
        }
    }

    /// True when this is an error reply.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_has_no_content() {
        let response = Response::empty();
        assert!(response.error.is_empty());
        assert!(response.message.is_empty());
        assert!(response.contacts.is_empty());
        assert!(!response.has_contacts);
    }

    #[test]
    fn test_message_and_error_are_exclusive() {
        let ok = Response::message("Added John's number: 123", "add John");
        assert!(!ok.is_error());
        assert!(ok.error.is_empty());

        let err = Response::error("Not found!", "what is Bob's number");
        assert!(err.is_error());
        assert!(err.message.is_empty());
    }

    #[test]
    fn test_contacts_response_with_empty_list() {
        let response = Response::contacts(Vec::new(), "show all contacts");
        assert!(response.has_contacts);
        assert!(response.contacts.is_empty());
        assert!(!response.is_error());
    }

    #[test]
    fn test_serializes_with_snake_case_fields() {
        let response = Response::contacts(vec![Contact::new("John", "123")], "all");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["has_contacts"], true);
        assert_eq!(json["contacts"][0]["name"], "John");
    }
}
