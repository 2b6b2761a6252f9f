//! Flutter-facing bridge over `msgbook_core`.

pub mod api;
