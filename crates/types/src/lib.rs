//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the terminal renderer and the input layer alike.
//!
//! # Level Dimensions
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 18 rows (indexed 0-17)
//! - **Spawn position**: pivot at (width / 2, -1), one row above the visible field
//! - **Configurable range**: 4 to 255 cells per side
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 150 | Simulation step interval |
//! | `FAST_FALL_FACTOR` | 10 | Fast fall runs the step clock 10x faster |
//! | `FRAME_MS` | 16 | Render cadence of the terminal runner (~60 FPS) |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Synthetic key release for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Command, ShapeKind, LEVEL_HEIGHT, LEVEL_WIDTH};
//!
//! assert_eq!(Command::from_name("ArrowLeft_down"), Some(Command::MoveLeft));
//! assert_eq!(Command::from_name("ArrowLeft_up"), None);
//!
//! assert_eq!(ShapeKind::from_code(ShapeKind::T.code()), Some(ShapeKind::T));
//!
//! assert_eq!(LEVEL_WIDTH, 8);
//! assert_eq!(LEVEL_HEIGHT, 18);
//! ```

/// Side length of the square frame every shape is defined in.
pub const SHAPE_DIMENSION: usize = 4;

/// Number of cells in a shape frame.
pub const SHAPE_CELLS: usize = SHAPE_DIMENSION * SHAPE_DIMENSION;

/// Level width in cells (8 columns)
pub const LEVEL_WIDTH: usize = 8;

/// Level height in cells (18 rows)
pub const LEVEL_HEIGHT: usize = 18;

/// Smallest accepted level side; a shape frame must fit across it.
pub const MIN_LEVEL_DIMENSION: usize = SHAPE_DIMENSION;

/// Largest accepted level side.
pub const MAX_LEVEL_DIMENSION: usize = 255;

/// Spawn row of a new figure's pivot (above the visible field).
pub const SPAWN_Y: i32 = -1;

/// Simulation step interval in milliseconds.
pub const TICK_MS: u32 = 150;

/// Divisor applied to the step interval while fast fall is held.
pub const FAST_FALL_FACTOR: f64 = 10.0;

/// Render cadence of the terminal runner in milliseconds.
pub const FRAME_MS: u32 = 16;

/// Idle time after which a held key counts as released when the terminal
/// cannot report releases.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Score awarded for the first row cleared by a single landing.
pub const LINE_CLEAR_BASE: u64 = 1000;

/// Chain multiplier numerator (3/2 = 1.5x per additional row in one landing)
pub const CHAIN_NUMERATOR: u64 = 3;

/// Chain multiplier denominator
pub const CHAIN_DENOMINATOR: u64 = 2;

/// Capacity of the per-frame command queue.
pub const COMMAND_QUEUE_CAPACITY: usize = 32;

/// The seven tetromino kinds of the shape catalog
///
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **O**: 2x2 square, the only kind that does not rotate
/// - **L**: L-shaped
/// - **J**: J-shaped (mirror of L)
/// - **I**: straight bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    S,
    Z,
    O,
    L,
    J,
    I,
}

impl ShapeKind {
    /// Every kind, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::I,
    ];

    /// Nonzero grid value a baked block of this kind is stored as.
    ///
    /// ```
    /// use blockdrop_types::ShapeKind;
    ///
    /// assert!(ShapeKind::ALL.iter().all(|k| k.code() != 0));
    /// ```
    pub fn code(&self) -> u8 {
        match self {
            ShapeKind::T => 1,
            ShapeKind::S => 2,
            ShapeKind::Z => 3,
            ShapeKind::O => 4,
            ShapeKind::L => 5,
            ShapeKind::J => 6,
            ShapeKind::I => 7,
        }
    }

    /// Inverse of [`ShapeKind::code`]. Returns `None` for 0 and unknown values.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ShapeKind::T),
            2 => Some(ShapeKind::S),
            3 => Some(ShapeKind::Z),
            4 => Some(ShapeKind::O),
            5 => Some(ShapeKind::L),
            6 => Some(ShapeKind::J),
            7 => Some(ShapeKind::I),
            _ => None,
        }
    }
}

/// Session mode.
///
/// `Begin` is reserved for a title screen: it rejects all input and does not
/// advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Begin,
    Playing,
    GameOver,
}

/// Discrete player commands
///
/// Hosts deliver input as names of the form `<key>_down` / `<key>_up`;
/// [`Command::from_name`] is the single place those names are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rotate the figure 90°, with wall-kick fallback
    Rotate,
    /// Move the figure one cell left
    MoveLeft,
    /// Move the figure one cell right
    MoveRight,
    /// Enter fast fall (accelerate key pressed)
    FastFallStart,
    /// Leave fast fall (accelerate key released)
    FastFallStop,
}

impl Command {
    /// Parse a host input name.
    ///
    /// ```
    /// use blockdrop_types::Command;
    ///
    /// assert_eq!(Command::from_name(" _down"), Some(Command::Rotate));
    /// assert_eq!(Command::from_name("ArrowUp_down"), Some(Command::Rotate));
    /// assert_eq!(Command::from_name("ArrowDown_up"), Some(Command::FastFallStop));
    /// assert_eq!(Command::from_name("Escape_down"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            " _down" | "ArrowUp_down" => Some(Command::Rotate),
            "ArrowLeft_down" => Some(Command::MoveLeft),
            "ArrowRight_down" => Some(Command::MoveRight),
            "ArrowDown_down" => Some(Command::FastFallStart),
            "ArrowDown_up" => Some(Command::FastFallStop),
            _ => None,
        }
    }

    /// Canonical host name of this command.
    pub fn as_name(&self) -> &'static str {
        match self {
            Command::Rotate => " _down",
            Command::MoveLeft => "ArrowLeft_down",
            Command::MoveRight => "ArrowRight_down",
            Command::FastFallStart => "ArrowDown_down",
            Command::FastFallStop => "ArrowDown_up",
        }
    }
}

/// Simulation parameters for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Step interval in milliseconds; always positive.
    pub tick_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            tick_ms: TICK_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Replace zero dimensions and a zero interval with the defaults, and
    /// clamp both dimensions to `MIN_LEVEL_DIMENSION..=MAX_LEVEL_DIMENSION`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let dimension = |value: usize, default: usize| {
            if value == 0 {
                default
            } else {
                value.clamp(MIN_LEVEL_DIMENSION, MAX_LEVEL_DIMENSION)
            }
        };
        Self {
            width: dimension(self.width, defaults.width),
            height: dimension(self.height, defaults.height),
            tick_ms: if self.tick_ms == 0 {
                defaults.tick_ms
            } else {
                self.tick_ms
            },
            seed: self.seed,
        }
    }
}
