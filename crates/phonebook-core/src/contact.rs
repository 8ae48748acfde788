//! Contact domain model.

use serde::{Deserialize, Serialize};

/// A single phone book entry.
///
/// Names are unique across the store; uniqueness is enforced by the
/// repository on insert, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, unique and non-empty.
    pub name: String,
    /// Phone number, non-empty. Stored as text, never parsed.
    pub phone: String,
}

impl Contact {
    /// Creates a new contact.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact() {
        let contact = Contact::new("John", "123456789");
        assert_eq!(contact.name, "John");
        assert_eq!(contact.phone, "123456789");
    }

    #[test]
    fn test_contact_serializes_with_plain_field_names() {
        let contact = Contact::new("Joanna", "888777555");
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["name"], "Joanna");
        assert_eq!(json["phone"], "888777555");
    }
}
