//! Core logic for msgbook, a small tool for recording and browsing
//! authored messages.
//! This crate owns the message store and the view navigation state machine.

pub mod app;
pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod repo;

pub use app::{Application, Presenter};
pub use config::{resolve_store_path, AppConfig, GeometryConfig, StoreConfig, WindowGeometry};
pub use controller::input_controller::{InputController, SubmitOutcome};
pub use controller::list_controller::{ListController, ListOutcome, MessageRow, COLUMN_HEADINGS};
pub use controller::Notice;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::message::{Message, MessageId, MessageValidationError, NewMessage};
pub use navigation::{Activation, NavigationError, ViewHook, ViewName, ViewRegistry};
pub use repo::message_store::{
    MessageRepository, SqliteMessageStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
