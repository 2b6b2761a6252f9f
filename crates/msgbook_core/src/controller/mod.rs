//! Controllers mediating between views and the message store.
//!
//! # Responsibility
//! - Turn a view action into one store call and a typed outcome.
//! - Keep views decoupled from storage details.
//!
//! # Invariants
//! - Storage failures become outcomes; they are never retried or swallowed.

pub mod input_controller;
pub mod list_controller;

/// Blocking notice shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text.as_str(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

pub(crate) fn storage_error_notice(reason: &str) -> Notice {
    Notice::Error(format!("Database error! Error: {reason}"))
}
