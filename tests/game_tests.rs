//! End-to-end tests for the simulation, driven through the public API.

use blockdrop::core::{
    Clock, CommandQueue, FallOutcome, Figure, Game, GameEvent, Grid, ManualClock, Shape,
};
use blockdrop::types::{GameConfig, Mode, ShapeKind};

fn seeded(seed: u32) -> Game {
    Game::new(GameConfig {
        seed,
        ..GameConfig::default()
    })
}

/// Drop `figure` straight down and bake it without clearing anything.
fn drop_figure(grid: &mut Grid, mut figure: Figure) {
    while figure.attempt_fall(|x, y| grid.collides_at(x, y)) == FallOutcome::Falling {}
    grid.bake(figure.shape(), figure.x, figure.y);
}

/// Drop and bake, then clear rows the way a game step does.
fn drop_and_bake(grid: &mut Grid, figure: Figure) -> usize {
    drop_figure(grid, figure);
    grid.clear_full_rows().len()
}

#[test]
fn test_square_stack_clears_only_when_row_complete() {
    let mut grid = Grid::new(8, 18);
    let square = Shape::of(ShapeKind::O);

    for (i, x) in [0, 2, 4].into_iter().enumerate() {
        let cleared = drop_and_bake(&mut grid, Figure::at(square, x, -1));
        assert_eq!(cleared, 0, "square {} must not clear anything", i);
        assert_eq!(grid.occupied(), 4 * (i + 1));
    }
    assert!(!grid.is_row_full(17));

    // The fourth square completes both bottom rows.
    drop_figure(&mut grid, Figure::at(square, 6, -1));
    assert!(grid.is_row_full(16));
    assert!(grid.is_row_full(17));
    assert!(!grid.is_row_full(15));

    assert_eq!(grid.clear_full_rows(), vec![16, 17]);
    assert_eq!(grid.occupied(), 0);
}

#[test]
fn test_square_stack_on_partial_row_clears_exactly_that_row() {
    let mut grid = Grid::new(8, 18);
    for x in 0..6 {
        grid.set(x, 17, 7);
    }
    grid.set(0, 16, 7);

    let cleared = drop_and_bake(&mut grid, Figure::at(Shape::of(ShapeKind::O), 6, -1));
    assert_eq!(cleared, 1);
    // Row 16 moved down: its marker plus the square's upper half.
    assert_eq!(grid.get(0, 17), 7);
    assert_eq!(grid.get(6, 17), ShapeKind::O.code());
    assert_eq!(grid.get(7, 17), ShapeKind::O.code());
    assert_eq!(grid.occupied(), 3);
}

#[test]
fn test_lifecycle_begin_playing_game_over_restart() {
    let mut game = seeded(7);
    assert_eq!(game.mode(), Mode::Begin);
    assert!(!game.process_input("ArrowLeft_down"));

    game.start();
    assert_eq!(game.mode(), Mode::Playing);

    // Without horizontal moves every piece lands around the spawn column and
    // no row can fill, so the stack must reach the top.
    game.enter_fast_fall();
    let mut steps = 0;
    while !game.is_game_over() && steps < 10_000 {
        game.advance(game.tick_interval_ms());
        steps += 1;
    }
    assert!(game.is_game_over());
    assert_eq!(game.score(), 0);
    assert!(game.pieces() >= 2 && game.pieces() <= 18);

    let events: Vec<_> = game.drain_events().collect();
    assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 0 })));
    let landings = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Landed { .. }))
        .count();
    assert_eq!(landings as u32, game.pieces() - 1);

    let frozen = game.snapshot();
    game.advance(1_000_000.0);
    assert_eq!(game.snapshot(), frozen);

    game.restart();
    assert_eq!(game.mode(), Mode::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.grid().occupied(), 0);
    assert!(!game.fast_fall());
    assert_eq!(game.tick_interval_ms(), 150.0);
}

#[test]
fn test_same_seed_and_inputs_replay_identically() {
    let script = [
        "ArrowLeft_down",
        " _down",
        "ArrowRight_down",
        "ArrowDown_down",
        "ArrowUp_down",
        "ArrowDown_up",
    ];

    let play = |seed: u32| {
        let mut game = seeded(seed);
        game.start();
        for round in 0..60 {
            game.process_input(script[round % script.len()]);
            game.advance(95.0);
        }
        game.snapshot()
    };

    assert_eq!(play(31337), play(31337));
}

#[test]
fn test_command_queue_drives_moves() {
    let mut game = seeded(5);
    game.start();
    let x0 = game.figure().x;

    let mut queue = CommandQueue::new();
    queue.push_name("ArrowLeft_down");
    queue.push_name("ArrowLeft_down");
    queue.push_name("Escape_down");
    assert_eq!(game.drain_commands(&mut queue), 2);
    assert_eq!(game.figure().x, x0 - 2);
}

#[test]
fn test_left_wall_blocks_movement() {
    let mut game = seeded(5);
    game.start();
    for _ in 0..10 {
        assert!(game.process_input("ArrowLeft_down"));
    }
    let x = game.figure().x;
    let leftmost = game.figure().blocks().map(|(bx, _, _)| bx).min();
    assert_eq!(leftmost, Some(0));

    assert!(game.process_input("ArrowLeft_down"));
    assert_eq!(game.figure().x, x);
}

#[test]
fn test_clock_driven_advance() {
    let mut game = seeded(11);
    game.start();
    let mut clock = ManualClock::new();

    game.advance_with(&mut clock);
    let y0 = game.figure().y;

    for _ in 0..10 {
        clock.advance(15.0);
        game.advance_with(&mut clock);
    }
    assert_eq!(clock.now_ms(), 150.0);
    assert_eq!(game.figure().y, y0 + 1);
}

#[test]
fn test_fast_fall_round_trip_preserves_timing() {
    let mut game = seeded(3);
    game.start();
    game.advance(120.0);

    game.process_input("ArrowDown_down");
    game.process_input("ArrowDown_down");
    game.process_input("ArrowDown_up");
    game.process_input("ArrowDown_up");

    assert_eq!(game.tick_interval_ms(), 150.0);
    assert_eq!(game.tick_accumulator_ms(), 120.0);
}
