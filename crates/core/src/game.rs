//! Game module - the simulation driver
//!
//! [`Game`] owns the grid, the falling figure, the RNG and all timing and
//! score state. It is advanced by elapsed wall-clock time and converts that
//! time into whole simulation steps; input arrives as [`Command`]s which are
//! dispatched on the current [`Mode`].
//!
//! A new game waits in [`Mode::Begin`] until [`Game::start`] is called, so the
//! runner can show a title screen before the first figure spawns.

use arrayvec::ArrayVec;

use crate::clock::Clock;
use crate::figure::{FallOutcome, Figure};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::scoring::calculate_clear_score;
use crate::shape::Shape;
use crate::types::{
    Command, GameConfig, Mode, ShapeKind, COMMAND_QUEUE_CAPACITY, FAST_FALL_FACTOR,
};

/// Events kept for observers before the oldest are dropped.
const MAX_PENDING_EVENTS: usize = 256;

/// Something observers may want to record. Drained with [`Game::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A figure was baked into the grid.
    Landed {
        rows_cleared: usize,
        score_added: u64,
        score: u64,
    },
    /// A freshly spawned figure collided with terrain.
    GameOver { score: u64 },
    /// The session was rebuilt from scratch.
    Restarted,
}

/// Bounded FIFO of commands collected between frames.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: ArrayVec<Command, COMMAND_QUEUE_CAPACITY>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command. Returns false (and drops it) when the queue is full.
    pub fn push(&mut self, command: Command) -> bool {
        self.commands.try_push(command).is_ok()
    }

    /// Parse and queue a host input name. Returns false for unknown names
    /// and when the queue is full.
    pub fn push_name(&mut self, name: &str) -> bool {
        match Command::from_name(name) {
            Some(command) => self.push(command),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    figure: Figure,
    rng: SimpleRng,
    mode: Mode,
    score: u64,
    /// Number of figures spawned this session.
    pieces: u32,
    tick_accumulator_ms: f64,
    tick_interval_ms: f64,
    fast_fall: bool,
    last_timestamp_ms: Option<f64>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a session in [`Mode::Begin`]. Call [`Game::start`] to play.
    pub fn new(config: GameConfig) -> Self {
        let config = config.sanitized();

        Self {
            config,
            grid: Grid::new(config.width, config.height),
            figure: Figure::spawn(Shape::of(ShapeKind::T), config.width),
            rng: SimpleRng::new(config.seed),
            mode: Mode::Begin,
            score: 0,
            pieces: 0,
            tick_accumulator_ms: 0.0,
            tick_interval_ms: config.tick_ms as f64,
            fast_fall: false,
            last_timestamp_ms: None,
            events: Vec::new(),
        }
    }

    /// Leave [`Mode::Begin`] and spawn the first figure.
    pub fn start(&mut self) {
        if self.mode != Mode::Begin {
            return;
        }
        self.mode = Mode::Playing;
        self.spawn_figure();
    }

    /// Throw the session away and start a new one. The RNG stream continues.
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.config.width, self.config.height);
        self.score = 0;
        self.pieces = 0;
        self.tick_accumulator_ms = 0.0;
        self.tick_interval_ms = self.config.tick_ms as f64;
        self.fast_fall = false;
        self.mode = Mode::Begin;
        self.push_event(GameEvent::Restarted);
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn fast_fall(&self) -> bool {
        self.fast_fall
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.tick_interval_ms
    }

    pub fn tick_accumulator_ms(&self) -> f64 {
        self.tick_accumulator_ms
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == Mode::GameOver
    }

    /// Take every event recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Feed elapsed time into the step clock.
    ///
    /// Every whole interval runs one step; a long pause produces a burst of
    /// steps rather than skipped ones. Nothing happens outside
    /// [`Mode::Playing`].
    pub fn advance(&mut self, elapsed_ms: f64) {
        if self.mode != Mode::Playing {
            return;
        }
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.tick_accumulator_ms += elapsed_ms;
        }

        while self.mode == Mode::Playing && self.tick_accumulator_ms >= self.tick_interval_ms {
            self.tick_accumulator_ms -= self.tick_interval_ms;
            self.step();
        }
    }

    /// Advance to an absolute timestamp. The first observation only sets the
    /// reference point.
    pub fn advance_to(&mut self, now_ms: f64) {
        let elapsed = match self.last_timestamp_ms {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(now_ms);
        self.advance(elapsed);
    }

    /// Sample `clock` and advance by the time since the previous sample.
    pub fn advance_with(&mut self, clock: &mut impl Clock) {
        self.advance_to(clock.now_ms());
    }

    /// One simulation step: gravity, and lock-in on landing.
    fn step(&mut self) {
        let grid = &self.grid;
        if self.figure.attempt_fall(|x, y| grid.collides_at(x, y)) == FallOutcome::Falling {
            return;
        }
        self.lock_figure();
    }

    /// Bake the figure, clear rows, score, and spawn the next figure.
    fn lock_figure(&mut self) {
        let figure = self.figure;
        self.grid.bake(figure.shape(), figure.x, figure.y);

        let rows_cleared = self.grid.clear_full_rows().len();
        let score_added = calculate_clear_score(rows_cleared);
        self.score += score_added;

        self.push_event(GameEvent::Landed {
            rows_cleared,
            score_added,
            score: self.score,
        });

        self.spawn_figure();
    }

    /// Replace the figure with a random one at the spawn point. Ends the game
    /// if it does not fit.
    fn spawn_figure(&mut self) -> bool {
        let shape = Shape::pick(&mut self.rng);
        self.figure.reset(shape, Figure::spawn_position(self.grid.width()));
        self.pieces = self.pieces.wrapping_add(1);

        let grid = &self.grid;
        if self.figure.is_colliding(|x, y| grid.collides_at(x, y)) {
            self.mode = Mode::GameOver;
            self.push_event(GameEvent::GameOver { score: self.score });
            return false;
        }
        true
    }

    /// Parse and apply a host input name such as `ArrowLeft_down`.
    ///
    /// Returns true when the input was handled; false when the name is not a
    /// command or the current mode does not accept input, so the host can let
    /// its default handling run.
    pub fn process_input(&mut self, name: &str) -> bool {
        match Command::from_name(name) {
            Some(command) => self.apply_command(command),
            None => false,
        }
    }

    /// Apply a command in the current mode.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match self.mode {
            Mode::Playing => self.handle_playing(command),
            Mode::Begin | Mode::GameOver => false,
        }
    }

    /// Apply every queued command in order. Returns how many were handled.
    pub fn drain_commands(&mut self, queue: &mut CommandQueue) -> usize {
        let mut handled = 0;
        for command in queue.commands.drain(..) {
            if self.apply_command(command) {
                handled += 1;
            }
        }
        handled
    }

    fn handle_playing(&mut self, command: Command) -> bool {
        let grid = &self.grid;
        let collides_at = |x, y| grid.collides_at(x, y);
        match command {
            Command::Rotate => {
                self.figure.attempt_rotate(collides_at);
            }
            Command::MoveLeft => {
                self.figure.attempt_move(-1, 0, collides_at);
            }
            Command::MoveRight => {
                self.figure.attempt_move(1, 0, collides_at);
            }
            Command::FastFallStart => self.enter_fast_fall(),
            Command::FastFallStop => self.exit_fast_fall(),
        }
        true
    }

    /// Run the step clock `FAST_FALL_FACTOR` times faster. No-op if already fast.
    pub fn enter_fast_fall(&mut self) {
        if self.fast_fall {
            return;
        }
        self.fast_fall = true;
        self.tick_accumulator_ms /= FAST_FALL_FACTOR;
        self.tick_interval_ms /= FAST_FALL_FACTOR;
    }

    /// Return to the normal step rate. No-op if not fast.
    pub fn exit_fast_fall(&mut self) {
        if !self.fast_fall {
            return;
        }
        self.fast_fall = false;
        self.tick_accumulator_ms *= FAST_FALL_FACTOR;
        self.tick_interval_ms *= FAST_FALL_FACTOR;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
