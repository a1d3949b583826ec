//! Terminal blockdrop runner (default binary).
//!
//! Reads crossterm input, feeds named inputs through a bounded command queue,
//! advances the game by wall-clock time and redraws through the framebuffer
//! renderer whenever the visible state changes.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockdrop::config::AppConfig;
use blockdrop::core::{Clock, CommandQueue, Game, GameSnapshot, MonotonicClock};
use blockdrop::event_log::{FileEventLog, LogRecord};
use blockdrop::input::{input_name, is_restart, is_start, should_quit, ReleaseEmulator};
use blockdrop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockdrop::types::Mode;

/// What the session ended with, for the exit status line.
struct Summary {
    score: u64,
    pieces: u32,
    seed: u32,
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let mut log = match config.event_log_path.as_deref() {
        Some(path) => Some(FileEventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(err) = log.as_mut().and_then(|l| l.take_error()) {
        eprintln!("[blockdrop] event log disabled after write error: {}", err);
    }
    let summary = result?;
    println!(
        "[blockdrop] score {} after {} pieces (seed {})",
        summary.score, summary.pieces, summary.seed
    );
    if let (Some(path), Some(log)) = (config.event_log_path.as_deref(), log.as_ref()) {
        println!("[blockdrop] {} events logged to {}", log.written(), path);
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    mut log: Option<&mut FileEventLog>,
) -> Result<Summary> {
    let mut game = Game::new(config.game);
    let mut clock = MonotonicClock::new();
    let mut queue = CommandQueue::new();
    let mut releases = ReleaseEmulator::new();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_drawn: Option<(u64, u16, u16)> = None;

    let frame = Duration::from_millis(config.frame_ms as u64);
    let (mut width, mut height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut last_ms = clock.now_ms();

    if let Some(log) = log.as_deref_mut() {
        log.record(&LogRecord::session_start(game.config()));
    }

    loop {
        // Input until the next frame is due.
        let frame_start = Instant::now();
        while let Some(remaining) = frame.checked_sub(frame_start.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(Summary {
                            score: game.score(),
                            pieces: game.pieces(),
                            seed: game.seed(),
                        });
                    }
                    match game.mode() {
                        Mode::Begin if is_start(key) => {
                            game.start();
                            continue;
                        }
                        Mode::GameOver if is_restart(key) => {
                            queue.clear();
                            releases.reset();
                            game.restart();
                            continue;
                        }
                        _ => {}
                    }

                    releases.observe(key);
                    if let Some(name) = input_name(key) {
                        // A full queue drops the newest input.
                        let _ = queue.push_name(name);
                    }
                }
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    term.invalidate();
                    last_drawn = None;
                }
                _ => {}
            }
        }

        let now = clock.now_ms();
        let elapsed = (now - last_ms).max(0.0);
        last_ms = now;

        for name in releases.update(elapsed as u32) {
            let _ = queue.push_name(name);
        }
        game.drain_commands(&mut queue);
        game.advance_to(now);

        for event in game.drain_events() {
            if let Some(log) = log.as_deref_mut() {
                log.record(&LogRecord::from(event));
            }
        }

        game.snapshot_into(&mut snap);
        let key = (snap.fingerprint(), width, height);
        if last_drawn != Some(key) {
            view.render_into(&snap, Viewport::new(width, height), &mut fb);
            term.draw_swap(&mut fb)?;
            last_drawn = Some(key);
        }
    }
}
