//! Key-release emulation for terminal environments.
//!
//! Most terminals only report presses (and auto-repeat presses while a key is
//! held). A key that has not been seen for the release timeout is treated as
//! released, so a held state such as fast fall cannot get stuck. As soon as
//! the terminal reports a real release event the emulation switches itself
//! off.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::Key;
use crate::types::KEY_RELEASE_TIMEOUT_MS;

const TRACKED_KEYS: usize = 5;

/// Synthesizes `_up` inputs for keys that went quiet.
#[derive(Debug, Clone)]
pub struct ReleaseEmulator {
    /// Held keys and the milliseconds since each was last seen.
    held: ArrayVec<(Key, u32), TRACKED_KEYS>,
    timeout_ms: u32,
    native_releases: bool,
}

impl ReleaseEmulator {
    pub fn new() -> Self {
        Self::with_timeout_ms(KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            timeout_ms,
            native_releases: false,
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// True once the terminal has reported a real release event.
    pub fn has_native_releases(&self) -> bool {
        self.native_releases
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|&(k, _)| k == key)
    }

    /// Record a key event read from the terminal.
    pub fn observe(&mut self, event: KeyEvent) {
        let Some(key) = Key::from_code(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Release => {
                self.native_releases = true;
                self.held.clear();
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.native_releases {
                    return;
                }
                match self.held.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = 0,
                    None => {
                        let _ = self.held.try_push((key, 0));
                    }
                }
            }
        }
    }

    /// Age held keys by `elapsed_ms` and return the `_up` input name of every
    /// key that crossed the timeout.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<&'static str, TRACKED_KEYS> {
        let mut released = ArrayVec::new();
        if self.native_releases {
            return released;
        }

        let timeout_ms = self.timeout_ms;
        self.held.retain(|(key, idle_ms)| {
            *idle_ms = idle_ms.saturating_add(elapsed_ms);
            if *idle_ms > timeout_ms {
                let _ = released.try_push(key.up_name());
                false
            } else {
                true
            }
        });

        released
    }

    /// Forget every held key, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for ReleaseEmulator {
    fn default() -> Self {
        Self::new()
    }
}
