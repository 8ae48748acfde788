//! Query use case: turns one utterance into one response.
//!
//! This is the confirmation state machine. Destructive deletion is split
//! into two phases (propose, then confirm) because natural-language parsing
//! is unreliable: a delete never touches the repository until the user has
//! answered the confirmation question. The per-session pending slot is the
//! only state carried across requests; every other action is self-contained.

use phonebook_core::{Action, Command, ContactRepository, PhonebookError, Response};
use phonebook_interaction::{CommandInterpreter, InterpreterError};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::pending::PendingActions;

/// Use case for handling one natural-language query against the contact
/// store.
///
/// # Thread Safety
///
/// All fields are `Arc`-shared; the pending store serializes access per
/// session, so a confirm can never observe a half-armed delete.
pub struct QueryUseCase {
    /// Repository for contact persistence
    repository: Arc<dyn ContactRepository>,
    /// Interpreter turning utterances into commands
    interpreter: Arc<dyn CommandInterpreter>,
    /// Per-session delete commands awaiting confirmation
    pending: PendingActions,
}

impl QueryUseCase {
    /// Creates a new `QueryUseCase` instance.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        interpreter: Arc<dyn CommandInterpreter>,
    ) -> Self {
        Self {
            repository,
            interpreter,
            pending: PendingActions::new(),
        }
    }

    /// Handles one raw utterance for the given session.
    ///
    /// Blank input is a no-op and never reaches the interpreter. Every
    /// failure is converted into an error response; nothing here is fatal
    /// to the process.
    pub async fn handle_query(&self, session_id: &str, input: &str) -> Response {
        self.handle_query_with(session_id, input, self.interpreter.as_ref())
            .await
    }

    /// Same as [`Self::handle_query`], with an explicit interpreter.
    ///
    /// Lets the transport honor a per-request model override while every
    /// request still shares the same repository and pending store.
    pub async fn handle_query_with(
        &self,
        session_id: &str,
        input: &str,
        interpreter: &dyn CommandInterpreter,
    ) -> Response {
        let query = input.trim();
        if query.is_empty() {
            return Response::empty();
        }

        let command = match interpreter.interpret(query).await {
            Ok(command) => command,
            Err(err) => {
                if let InterpreterError::Decode { raw, .. } = &err {
                    warn!(raw = %raw, "backend reply was not a command");
                }
                error!(session_id, error = %err, "interpretation failed");
                return Response::error(err.to_string(), "");
            }
        };

        info!(session_id, ?command, "parsed command");
        self.execute(session_id, command, query).await
    }

    /// Applies one parsed command against the repository and the session's
    /// pending slot. At most one repository mutation per invocation.
    async fn execute(&self, session_id: &str, command: Command, query: &str) -> Response {
        match command.action {
            Action::Create => {
                self.pending.clear(session_id).await;
                if command.name.is_empty() || command.phone.is_empty() {
                    return Response::error("Can't create: name or phone number is missing", query);
                }
                match self.repository.insert(&command.name, &command.phone).await {
                    Ok(_) => {
                        Response::message(format!("{}{}", command.message, command.phone), query)
                    }
                    Err(err @ PhonebookError::Conflict { .. }) => {
                        Response::error(err.to_string(), query)
                    }
                    Err(err) => {
                        error!(session_id, error = %err, "create failed");
                        Response::error("Failed to create contact", query)
                    }
                }
            }

            Action::Read => {
                self.pending.clear(session_id).await;
                if command.is_read_all() {
                    match self.repository.list_all().await {
                        Ok(contacts) => Response::contacts(contacts, query),
                        Err(err) => {
                            error!(session_id, error = %err, "list failed");
                            Response::error("Something went wrong...", query)
                        }
                    }
                } else if command.has_target() {
                    self.read_one(session_id, &command, query).await
                } else {
                    Response::error("Can't look up: no name or phone number given", query)
                }
            }

            Action::Update => {
                self.pending.clear(session_id).await;
                if command.name.is_empty() || command.phone.is_empty() {
                    return Response::error("Can't update: name or phone number is missing", query);
                }
                match self
                    .repository
                    .update_phone(&command.name, &command.phone)
                    .await
                {
                    Ok(_) => {
                        Response::message(format!("{} {}", command.message, command.phone), query)
                    }
                    Err(err) if err.is_not_found() => {
                        Response::error("Can't update, not found!", query)
                    }
                    Err(err) => {
                        error!(session_id, error = %err, "update failed");
                        Response::error("Failed to update contact", query)
                    }
                }
            }

            Action::Delete => {
                if !command.has_target() {
                    self.pending.clear(session_id).await;
                    return Response::error("Can't delete: no name or phone number given", query);
                }
                // No repository call yet: park the command and echo the
                // confirmation question the interpreter produced.
                let question = command.message.clone();
                self.pending.arm(session_id, command).await;
                Response::message(question, query)
            }

            Action::Confirm => {
                let Some(pending) = self.pending.take(session_id).await else {
                    return Response::message("Nothing to confirm.", query);
                };
                match self
                    .repository
                    .delete_by_name_or_phone(&pending.name, &pending.phone)
                    .await
                {
                    Ok(removed) => {
                        Response::message(format!("Removed contact: {}", removed.name), query)
                    }
                    Err(err) if err.is_not_found() => {
                        Response::error("Can't delete, not found!", query)
                    }
                    Err(err) => {
                        error!(session_id, error = %err, "delete failed");
                        Response::error("Failed to delete contact", query)
                    }
                }
            }

            Action::Cancel => {
                self.pending.clear(session_id).await;
                Response::message("Contact not removed.", query)
            }

            Action::Unknown => {
                // Ambiguous input must never leave a stale delete armed.
                self.pending.clear(session_id).await;
                Response::error("Unknown command", query)
            }
        }
    }

    async fn read_one(&self, session_id: &str, command: &Command, query: &str) -> Response {
        match self
            .repository
            .find_by_name_or_phone(&command.name, &command.phone)
            .await
        {
            Ok(Some(contact)) => {
                // Asked by name ⇒ report the phone, asked by phone ⇒ report
                // the name. Name wins when both were supplied.
                let detail = if !command.name.is_empty() {
                    contact.phone
                } else {
                    contact.name
                };
                Response::message(format!("{} {}", command.message, detail), query)
            }
            Ok(None) => Response::error("Not found!", query),
            Err(err) => {
                error!(session_id, error = %err, "lookup failed");
                Response::error("Something went wrong...", query)
            }
        }
    }
}
