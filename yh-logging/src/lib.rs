//! yh-logging: NDJSON event logs for simulation runs.
//!
//! Append-only, one JSON object per line, so a crashed run still leaves every
//! completed line readable.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version carried by every record.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

/// Identifies the scoring rules the events were produced under.
pub const RULESET_ID: &str = "yahtzee13_fullhouse311_v1";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Minimal log schema versioning fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfoV1 {
    pub schema_version: u32,
    pub ruleset_id: String,
}

impl Default for VersionInfoV1 {
    fn default() -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            ruleset_id: RULESET_ID.to_string(),
        }
    }
}

/// One committed round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecordV1 {
    pub round: u8,
    pub dice: [u8; 5],
    pub category: String,
    pub score: u32,
}

/// Emitted once per finished game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEventV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub episode_seed: u64,
    pub policy: String,

    pub final_score: u32,
    pub upper_total: u32,
    pub bonus: u32,
    pub rounds: Vec<RoundRecordV1>,
}

/// Emitted once at the end of a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSummaryEventV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub policy: String,
    pub games: u64,
    pub base_seed: u64,
    pub deterministic_chance: bool,
    pub config_hash: Option<String>,

    pub mean: f64,
    pub median: u32,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub bonus_rate: f64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("ndjson io error: {0}")]
    Io(#[from] io::Error),
    #[error("ndjson encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// NDJSON sink: each event becomes one JSON object terminated by `\n`.
///
/// Generic over the output so tests and callers can target memory buffers;
/// [`NdjsonWriter::open_append`] is the file-backed form.
pub struct NdjsonWriter<W: Write = BufWriter<File>> {
    out: W,
    /// Lines written since the last flush.
    pending: u64,
    /// 0 disables periodic flushing.
    flush_every: u64,
}

impl NdjsonWriter {
    /// Open `path` for append, creating it if needed.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every: u64,
    ) -> Result<Self, NdjsonError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(NdjsonWriter::new(BufWriter::new(file), flush_every))
    }
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(out: W, flush_every: u64) -> Self {
        Self {
            out,
            pending: 0,
            flush_every,
        }
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.pending += 1;
        if self.flush_every != 0 && self.pending >= self.flush_every {
            self.flush()?;
        }
        Ok(())
    }

    /// Write every event in order; returns the number of lines written.
    pub fn write_events<T, I>(&mut self, events: I) -> Result<u64, NdjsonError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let mut n = 0;
        for ev in events {
            self.write_event(&ev)?;
            n += 1;
        }
        Ok(n)
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.out.flush()?;
        self.pending = 0;
        Ok(())
    }

    /// Flush and hand back the underlying output.
    pub fn into_inner(mut self) -> Result<W, NdjsonError> {
        self.flush()?;
        Ok(self.out)
    }
}

/// Read every complete, valid line of an NDJSON file as `T`.
///
/// Blank and malformed lines (e.g. a torn final line) are skipped.
pub fn read_ndjson_lenient<T: for<'de> Deserialize<'de>>(
    path: impl AsRef<Path>,
) -> Result<Vec<T>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<T>(line).ok())
        .collect())
}
