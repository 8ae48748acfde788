pub mod command;
pub mod config;
pub mod contact;
pub mod error;
pub mod repository;
pub mod response;

// Re-export common types
pub use command::{Action, Command, NAME_ALL};
pub use contact::Contact;
pub use error::{PhonebookError, Result};
pub use repository::ContactRepository;
pub use response::Response;
