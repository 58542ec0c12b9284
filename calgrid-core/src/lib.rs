//! Core library for the calgrid calendar client.
//!
//! This crate holds everything below the terminal UI:
//! - `event` and `recurrence` for the calendar event model and the expansion
//!   of recurring events into displayable instances
//! - `coordinator` for optimistic mutations against the remote event store
//! - `remote` for the HTTP event-store client and its wire format
//! - `session`, `notes`, `config` for local state under the platform dirs
//! - `grid` and `date_range` for calendar geometry and agenda filtering

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod notes;
pub mod recurrence;
pub mod remote;
pub mod session;

pub use error::{CalGridError, CalGridResult};

// Re-export the event model at crate root for convenience
pub use event::*;
