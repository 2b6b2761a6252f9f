//! Persistence layer for messages.
//!
//! # Responsibility
//! - Define the store contract used by controllers.
//! - Isolate SQLite query details from controllers and views.
//!
//! # Invariants
//! - Write paths call `NewMessage::validate()` before SQL mutations.

pub mod message_store;
