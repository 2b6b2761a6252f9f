//! Input controller for the `InputData` view.
//!
//! # Invariants
//! - Empty fields never reach the store.
//! - Persisted values are the trimmed user input.

use super::{storage_error_notice, Notice};
use crate::model::message::{MessageId, MessageValidationError, NewMessage};
use crate::repo::message_store::MessageRepository;
use log::{info, warn};

/// Result of one submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the view clears its fields.
    Submitted(MessageId),
    /// A field was empty; the store was not touched.
    ValidationFailed(MessageValidationError),
    /// The store rejected the write; the view keeps its fields.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// Whether the view should clear its input fields.
    pub fn clears_input(&self) -> bool {
        self.is_submitted()
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::Submitted(_) => Notice::Info("Database row inserted.".to_string()),
            Self::ValidationFailed(_) => {
                Notice::Error("Both values need to be present.".to_string())
            }
            Self::Failed(reason) => storage_error_notice(reason),
        }
    }
}

/// Validates and submits new messages.
pub struct InputController<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> InputController<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Submits one message from raw form input.
    pub fn submit(&self, content: &str, author: &str) -> SubmitOutcome {
        let draft = NewMessage::from_input(content, author);
        if let Err(err) = draft.validate() {
            info!("event=message_submit module=controller status=rejected reason={err}");
            return SubmitOutcome::ValidationFailed(err);
        }

        match self.repo.create_message(&draft) {
            Ok(id) => {
                info!("event=message_submit module=controller status=ok id={id}");
                SubmitOutcome::Submitted(id)
            }
            Err(err) => {
                warn!("event=message_submit module=controller status=error error={err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }
}
