//! Terminal rendering for blockdrop.
//!
//! Renders into a plain framebuffer of styled cells (no widget toolkit) and
//! flushes it to the terminal with diff encoding. [`GameView`] is pure and
//! unit-tested; [`TerminalRenderer`] is the only part that touches stdout.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{block_color, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
