//! Domain model for authored messages.
//!
//! # Responsibility
//! - Define the persisted `Message` record and its write-side draft.
//!
//! # Invariants
//! - Every persisted message is identified by a store-assigned `MessageId`.
//! - Messages are never mutated or deleted by this crate.

pub mod message;
