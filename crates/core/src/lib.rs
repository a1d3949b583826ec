//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is independent of terminals and I/O. The same seed and the
//! same sequence of inputs and elapsed times always produce the same game.
//!
//! # Module Structure
//!
//! - [`grid`]: the field of settled blocks, collision queries, row clearing
//! - [`shape`]: the seven 4x4 shapes and the rotation transform
//! - [`figure`]: the falling piece and its tentative moves with wall kick
//! - [`game`]: the simulation driver (timing, input dispatch, lock-in)
//! - [`scoring`]: chained row-clear points
//! - [`rng`]: seeded LCG for shape selection
//! - [`clock`]: time sources that feed [`Game::advance_to`]
//! - [`snapshot`]: render-ready copies of the game state
//!
//! # Example
//!
//! ```
//! use blockdrop_core::Game;
//! use blockdrop_core::types::{GameConfig, Mode};
//!
//! let mut game = Game::new(GameConfig::default());
//! game.start();
//! assert_eq!(game.mode(), Mode::Playing);
//!
//! assert!(game.process_input("ArrowLeft_down"));
//! game.advance(game.tick_interval_ms() * 3.0);
//! assert_eq!(game.figure().y, 2);
//! ```
//!
//! # Timing
//!
//! Gravity is a fixed-interval step clock. Elapsed time accumulates and every
//! whole interval runs one step, so a stalled frame catches up with a burst of
//! steps. Fast fall divides both the interval and the accumulated time by
//! [`types::FAST_FALL_FACTOR`].

pub mod clock;
pub mod figure;
pub mod game;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockdrop_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use figure::{FallOutcome, Figure};
pub use game::{CommandQueue, Game, GameEvent};
pub use grid::Grid;
pub use rng::SimpleRng;
pub use scoring::calculate_clear_score;
pub use shape::Shape;
pub use snapshot::{BlockSnapshot, GameSnapshot};
