use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::engine::{RunOutcome, RunTotals};

const NANOS_PER_MINUTE: u128 = 60_000_000_000;

/// Speed and accuracy derived from a finished run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStats {
    pub wpm: u64,
    pub cpm: u64,
    pub accuracy: f64,
}

impl RunStats {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        Self::from_totals(outcome.totals, outcome.elapsed.as_nanos())
    }

    pub fn from_totals(totals: RunTotals, elapsed_nanos: u128) -> Self {
        // ncorrect / (t / 60e9), truncated; elapsed is floored at one tick
        let cpm = totals.ncorrect as u128 * NANOS_PER_MINUTE / elapsed_nanos.max(1);
        let cpm = u64::try_from(cpm).unwrap_or(u64::MAX);

        Self {
            wpm: cpm / 5,
            cpm,
            accuracy: accuracy(totals),
        }
    }
}

/// Percentage of keystrokes that were correct, 0 when nothing was typed
pub fn accuracy(totals: RunTotals) -> f64 {
    match totals.keystrokes() {
        0 => 0.0,
        total => totals.ncorrect as f64 * 100.0 / total as f64,
    }
}

/// Results of every finished run in this invocation, in order
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<RunStats>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: RunStats) {
        self.results.push(stats);
    }

    /// One `<wpm>,<cpm>,<accuracy>` line per run, no header
    pub fn write_csv<W: Write>(&self, out: W) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);

        for r in &self.results {
            writer.write_record([
                r.wpm.to_string(),
                r.cpm.to_string(),
                format!("{:.2}", r.accuracy),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Append-only history of finished runs kept across invocations
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, stats: &RunStats, outcome: &RunOutcome) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the file doesn't exist yet we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record([
                "date",
                "wpm",
                "cpm",
                "accuracy",
                "elapsed_secs",
                "exit_reason",
            ])?;
        }

        writer.write_record([
            Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            stats.wpm.to_string(),
            stats.cpm.to_string(),
            format!("{:.2}", stats.accuracy),
            format!("{:.2}", outcome.elapsed.as_secs_f64()),
            outcome.reason.to_string(),
        ])?;
        writer.flush()?;

        debug!(path = %self.path.display(), "appended run to history");
        Ok(())
    }
}
