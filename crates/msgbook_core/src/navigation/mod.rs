//! View navigation state machine.
//!
//! # Responsibility
//! - Name the fixed set of views as a closed enum.
//! - Track exactly one active view and run the activation hook on each
//!   transition.

pub mod registry;
pub mod view;

pub use registry::{Activation, ViewHook, ViewRegistry};
pub use view::{NavigationError, ViewName};
