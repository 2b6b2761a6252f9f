//! Message domain model.
//!
//! # Responsibility
//! - Define the canonical persisted message and the draft used to create one.
//! - Own the non-empty field rules shared by controllers and the store.
//!
//! # Invariants
//! - `id` and `created` are assigned by the store, never by callers.
//! - `content` and `author` are non-empty once persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier; never renumbered or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted message row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub author: String,
    /// UTC calendar date of insertion.
    pub created: NaiveDate,
}

/// Field-level validation failure for message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageValidationError {
    EmptyContent,
    EmptyAuthor,
}

impl Display for MessageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "message content cannot be empty"),
            Self::EmptyAuthor => write!(f, "message author cannot be empty"),
        }
    }
}

impl Error for MessageValidationError {}

/// Write-side draft; the store fills in `id` and `created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub author: String,
}

impl NewMessage {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }

    /// Builds a draft from raw form input, trimming surrounding whitespace.
    ///
    /// Multi-line text widgets typically hand back a trailing newline; that
    /// is not part of the message.
    pub fn from_input(content: &str, author: &str) -> Self {
        Self::new(content.trim(), author.trim())
    }

    /// Checks that both fields carry visible text.
    ///
    /// Content is checked first, so an entirely empty form reports
    /// `EmptyContent`.
    pub fn validate(&self) -> Result<(), MessageValidationError> {
        validate_fields(&self.content, &self.author)
    }
}

impl Message {
    /// Re-checks the non-empty field rules on a row read back from storage.
    pub fn validate(&self) -> Result<(), MessageValidationError> {
        validate_fields(&self.content, &self.author)
    }
}

fn validate_fields(content: &str, author: &str) -> Result<(), MessageValidationError> {
    if content.trim().is_empty() {
        return Err(MessageValidationError::EmptyContent);
    }
    if author.trim().is_empty() {
        return Err(MessageValidationError::EmptyAuthor);
    }
    Ok(())
}
