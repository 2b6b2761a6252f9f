//! List controller for the `ViewData` view.
//!
//! # Invariants
//! - Rows keep store order.
//! - A failed refresh leaves the previously displayed rows untouched.

use super::{storage_error_notice, Notice};
use crate::model::message::Message;
use crate::repo::message_store::MessageRepository;
use log::{debug, warn};
use serde::Serialize;

/// Column headings for tabular presentation.
pub const COLUMN_HEADINGS: [&str; 4] = ["id", "message", "author", "date"];

/// Display-ready message row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    pub id: String,
    pub content: String,
    pub author: String,
    pub created: String,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            content: message.content.clone(),
            author: message.author.clone(),
            created: message.created.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Result of one refresh action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Refreshed(Vec<MessageRow>),
    Failed(String),
}

impl ListOutcome {
    /// Notice to show, if any; a successful refresh is silent.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Refreshed(_) => None,
            Self::Failed(reason) => Some(storage_error_notice(reason)),
        }
    }
}

/// Pulls messages for display and remembers the last good snapshot.
pub struct ListController<R: MessageRepository> {
    repo: R,
    rows: Vec<MessageRow>,
}

impl<R: MessageRepository> ListController<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            rows: Vec::new(),
        }
    }

    /// Rows currently on display.
    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn refresh(&mut self) -> ListOutcome {
        match self.repo.list_messages() {
            Ok(messages) => {
                self.rows = messages.iter().map(MessageRow::from).collect();
                debug!(
                    "event=message_refresh module=controller status=ok count={}",
                    self.rows.len()
                );
                ListOutcome::Refreshed(self.rows.clone())
            }
            Err(err) => {
                warn!("event=message_refresh module=controller status=error error={err}");
                ListOutcome::Failed(err.to_string())
            }
        }
    }
}
