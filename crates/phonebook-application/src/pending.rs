//! Per-session store for delete commands awaiting confirmation.

use phonebook_core::Command;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store of pending delete commands, keyed by session id.
///
/// Each session holds at most one pending command: a second delete
/// overwrites, and every terminal action clears. Keying by session keeps
/// overlapping deletes from different users out of each other's slots.
#[derive(Clone)]
pub struct PendingActions {
    /// In-memory pending slots
    slots: Arc<RwLock<HashMap<String, Command>>>,
}

impl PendingActions {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Arms the session's slot with a delete command, replacing any
    /// previous one.
    pub async fn arm(&self, session_id: &str, command: Command) {
        let mut slots = self.slots.write().await;
        slots.insert(session_id.to_string(), command);
    }

    /// Takes the session's pending command, leaving the slot empty.
    pub async fn take(&self, session_id: &str) -> Option<Command> {
        let mut slots = self.slots.write().await;
        slots.remove(session_id)
    }

    /// Clears the session's slot.
    pub async fn clear(&self, session_id: &str) {
        let mut slots = self.slots.write().await;
        slots.remove(session_id);
    }

    /// True when the session has a delete awaiting confirmation.
    pub async fn is_armed(&self, session_id: &str) -> bool {
        let slots = self.slots.read().await;
        slots.contains_key(session_id)
    }
}

impl Default for PendingActions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_core::Action;

    fn delete_command(name: &str) -> Command {
        Command {
            action: Action::Delete,
            name: name.to_string(),
            ..Command::default()
        }
    }

    #[tokio::test]
    async fn test_arm_and_take() {
        let pending = PendingActions::new();
        pending.arm("s1", delete_command("John")).await;

        assert!(pending.is_armed("s1").await);
        let taken = pending.take("s1").await.unwrap();
        assert_eq!(taken.name, "John");
        assert!(!pending.is_armed("s1").await);
    }

    #[tokio::test]
    async fn test_second_arm_overwrites() {
        let pending = PendingActions::new();
        pending.arm("s1", delete_command("John")).await;
        pending.arm("s1", delete_command("Joanna")).await;

        assert_eq!(pending.take("s1").await.unwrap().name, "Joanna");
        assert!(pending.take("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let pending = PendingActions::new();
        pending.arm("alice", delete_command("John")).await;

        assert!(pending.take("bob").await.is_none());
        assert!(pending.is_armed("alice").await);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let pending = PendingActions::new();
        pending.clear("s1").await;
        pending.arm("s1", delete_command("John")).await;
        pending.clear("s1").await;
        pending.clear("s1").await;

        assert!(!pending.is_armed("s1").await);
    }
}
