//! Runner configuration from environment variables.
//!
//! Every variable is optional. Missing or unparseable values silently fall
//! back to the defaults, so a typo never keeps the game from starting.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{GameConfig, FRAME_MS};

/// Everything the terminal runner needs to start a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Render cadence in milliseconds.
    pub frame_ms: u32,
    /// JSON-lines session log, if enabled.
    pub event_log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            frame_ms: FRAME_MS,
            event_log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let seed = parse_seed(lookup("BLOCKDROP_SEED")).unwrap_or_else(clock_seed);

        let game = GameConfig {
            width: parsed("BLOCKDROP_WIDTH")
                .map(|v| v as usize)
                .unwrap_or(defaults.game.width),
            height: parsed("BLOCKDROP_HEIGHT")
                .map(|v| v as usize)
                .unwrap_or(defaults.game.height),
            tick_ms: parsed("BLOCKDROP_TICK_MS")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.game.tick_ms),
            seed,
        }
        .sanitized();

        let frame_ms = parsed("BLOCKDROP_FRAME_MS")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&v| v > 0)
            .unwrap_or(defaults.frame_ms);

        let event_log_path = lookup("BLOCKDROP_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            game,
            frame_ms,
            event_log_path,
        }
    }
}

/// Seeds outside the `u32` range are rejected rather than truncated.
fn parse_seed(raw: Option<String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

/// Seed from the wall clock for unseeded sessions.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MAX_LEVEL_DIMENSION, MIN_LEVEL_DIMENSION};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[("BLOCKDROP_SEED", "9")]));
        assert_eq!(config.game.width, 8);
        assert_eq!(config.game.height, 18);
        assert_eq!(config.game.tick_ms, 150);
        assert_eq!(config.game.seed, 9);
        assert_eq!(config.frame_ms, FRAME_MS);
        assert_eq!(config.event_log_path, None);
    }

    #[test]
    fn test_values_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BLOCKDROP_SEED", "42"),
            ("BLOCKDROP_TICK_MS", " 90 "),
            ("BLOCKDROP_WIDTH", "10"),
            ("BLOCKDROP_HEIGHT", "20"),
            ("BLOCKDROP_FRAME_MS", "33"),
            ("BLOCKDROP_EVENT_LOG", "/tmp/blockdrop.jsonl"),
        ]));
        assert_eq!(
            config.game,
            GameConfig {
                width: 10,
                height: 20,
                tick_ms: 90,
                seed: 42,
            }
        );
        assert_eq!(config.frame_ms, 33);
        assert_eq!(
            config.event_log_path.as_deref(),
            Some("/tmp/blockdrop.jsonl")
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BLOCKDROP_SEED", "1"),
            ("BLOCKDROP_TICK_MS", "0"),
            ("BLOCKDROP_WIDTH", "wide"),
            ("BLOCKDROP_HEIGHT", "-3"),
            ("BLOCKDROP_FRAME_MS", "0"),
            ("BLOCKDROP_EVENT_LOG", "   "),
        ]));
        assert_eq!(config.game.tick_ms, 150);
        assert_eq!(config.game.width, 8);
        assert_eq!(config.game.height, 18);
        assert_eq!(config.frame_ms, FRAME_MS);
        assert_eq!(config.event_log_path, None);
    }

    #[test]
    fn test_seed_outside_u32_is_rejected() {
        assert_eq!(parse_seed(Some("4294967295".into())), Some(u32::MAX));
        assert_eq!(parse_seed(Some(" 7 ".into())), Some(7));
        assert_eq!(parse_seed(Some("4294967296".into())), None);
        assert_eq!(parse_seed(Some("-1".into())), None);
        assert_eq!(parse_seed(None), None);
    }

    #[test]
    fn test_oversized_dimensions_are_clamped() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BLOCKDROP_SEED", "1"),
            ("BLOCKDROP_WIDTH", "1099511627776"),
            ("BLOCKDROP_HEIGHT", "2"),
        ]));
        assert_eq!(config.game.width, MAX_LEVEL_DIMENSION);
        assert_eq!(config.game.height, MIN_LEVEL_DIMENSION);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = AppConfig::from_env();
    }
}
