//! Contact repository trait.

use async_trait::async_trait;

use crate::contact::Contact;
use crate::error::Result;

/// Repository trait for contact persistence.
///
/// Name uniqueness is enforced by the store (insert conflict), not by the
/// callers. Lookup and delete use OR semantics over name and phone: when both
/// are given, either match counts.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Inserts a new contact.
    ///
    /// Returns `PhonebookError::Conflict` when the name is already taken.
    async fn insert(&self, name: &str, phone: &str) -> Result<Contact>;

    /// Finds a contact whose name or phone matches.
    ///
    /// Returns `Ok(None)` on a miss; errors are reserved for storage
    /// failures.
    async fn find_by_name_or_phone(&self, name: &str, phone: &str) -> Result<Option<Contact>>;

    /// Updates the phone number of the contact with the given name.
    ///
    /// Returns the updated contact, or `PhonebookError::NotFound` when no
    /// contact has that name. Never inserts.
    async fn update_phone(&self, name: &str, phone: &str) -> Result<Contact>;

    /// Deletes the contact whose name or phone matches.
    ///
    /// Returns the removed contact, or `PhonebookError::NotFound` when
    /// nothing matched.
    async fn delete_by_name_or_phone(&self, name: &str, phone: &str) -> Result<Contact>;

    /// Lists every contact in insertion order.
    async fn list_all(&self) -> Result<Vec<Contact>>;
}
