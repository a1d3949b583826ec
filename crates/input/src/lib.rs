//! Terminal input module.
//!
//! Maps `crossterm` key events to the game's named inputs (`ArrowLeft_down`,
//! `ArrowDown_up`, ...) which [`blockdrop_types::Command::from_name`] parses,
//! and emulates key releases for terminals that never report them.

pub mod handler;
pub mod map;

pub use blockdrop_types as types;

pub use handler::ReleaseEmulator;
pub use map::{input_name, is_restart, is_start, should_quit, Key};
