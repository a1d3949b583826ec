//! Optional JSON-lines session log.
//!
//! One record per line: `{"seq":3,"type":"lock","lines_cleared":1,...}`.
//! Logging never interrupts play. The first write failure disables the log
//! and is kept for the runner to report once the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameEvent;
use crate::types::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    SessionStart {
        seed: u32,
        width: usize,
        height: usize,
        tick_ms: u32,
    },
    Lock {
        lines_cleared: usize,
        score_added: u64,
        score: u64,
    },
    GameOver {
        score: u64,
    },
    Restart,
}

impl LogRecord {
    pub fn session_start(config: &GameConfig) -> Self {
        LogRecord::SessionStart {
            seed: config.seed,
            width: config.width,
            height: config.height,
            tick_ms: config.tick_ms,
        }
    }
}

impl From<GameEvent> for LogRecord {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Landed {
                rows_cleared,
                score_added,
                score,
            } => LogRecord::Lock {
                lines_cleared: rows_cleared,
                score_added,
                score,
            },
            GameEvent::GameOver { score } => LogRecord::GameOver { score },
            GameEvent::Restarted => LogRecord::Restart,
        }
    }
}

#[derive(Serialize)]
struct Line<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a LogRecord,
}

/// Append-only writer of [`LogRecord`]s.
pub struct EventLog<W: Write> {
    out: Option<W>,
    seq: u64,
    error: Option<io::Error>,
}

pub type FileEventLog = EventLog<BufWriter<File>>;

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, record: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let line = Line {
            seq: self.seq,
            record,
        };
        let result = serde_json::to_writer(&mut *out, &line)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());

        match result {
            Ok(()) => self.seq += 1,
            Err(e) => {
                self.out = None;
                self.error = Some(e);
            }
        }
    }

    /// The write error that disabled the log, if any. Reported once.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Give back the underlying writer, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn records_are_tagged_json_lines() {
        let mut log = EventLog::new(Vec::new());
        log.record(&LogRecord::session_start(&GameConfig::default()));
        log.record(&LogRecord::from(GameEvent::Landed {
            rows_cleared: 2,
            score_added: 2500,
            score: 2500,
        }));
        log.record(&LogRecord::from(GameEvent::GameOver { score: 2500 }));
        log.record(&LogRecord::from(GameEvent::Restarted));
        assert_eq!(log.written(), 4);

        let buf = log.into_inner().unwrap();
        let v = lines(&buf);
        assert_eq!(v.len(), 4);
        assert_eq!(v[0]["type"], "session_start");
        assert_eq!(v[0]["width"], 8);
        assert_eq!(v[0]["tick_ms"], 150);
        assert_eq!(v[1]["type"], "lock");
        assert_eq!(v[1]["seq"], 1);
        assert_eq!(v[1]["lines_cleared"], 2);
        assert_eq!(v[1]["score_added"], 2500);
        assert_eq!(v[2]["type"], "game_over");
        assert_eq!(v[3]["type"], "restart");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_disables_log_and_is_reported_once() {
        let mut log = EventLog::new(FailingWriter);
        log.record(&LogRecord::Restart);
        assert!(!log.is_enabled());
        assert!(log.take_error().is_some());
        assert!(log.take_error().is_none());

        log.record(&LogRecord::Restart);
        assert_eq!(log.written(), 0);
    }

    #[test]
    fn open_reports_bad_path() {
        let err = EventLog::open("/nonexistent-dir/blockdrop/events.jsonl").err();
        assert!(err.is_some());
        let msg = format!("{:#}", err.unwrap());
        assert!(msg.contains("failed to open event log"));
    }
}
