//! blockdrop (workspace facade crate).
//!
//! Re-exports the game crates under short names (`blockdrop::core`,
//! `blockdrop::term`, ...) and hosts the runner-only pieces: environment
//! configuration and the session event log.

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;

pub mod config;
pub mod event_log;
