//! Structured event history for long-running services
//!
//! Entries are kept in a bounded in-memory ring (oldest dropped first) and,
//! when a file is attached, appended to it as JSON lines. Every entry is also
//! echoed to the console through the regular leveled output unless the log
//! was built silent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;

use crate::Level;

pub const DEFAULT_CAPACITY: usize = 2000;

/// A single structured log entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: Level,
  pub message: String,
  pub component: String,
}

struct EventLogInner {
  entries: VecDeque<LogEntry>,
  capacity: usize,
  file: Option<PathBuf>,
  silent: bool,
}

/// Cheaply cloneable handle to a shared event history
#[derive(Clone)]
pub struct EventLog {
  inner: Arc<Mutex<EventLogInner>>,
}

impl EventLogInner {
  /// Keep the entry in memory, then append it to the file if one is attached
  fn push(&mut self, entry: LogEntry) -> std::io::Result<()> {
    while self.entries.len() >= self.capacity.max(1) {
      self.entries.pop_front();
    }
    self.entries.push_back(entry);

    let (Some(path), Some(entry)) = (&self.file, self.entries.back()) else {
      return Ok(());
    };
    let line = serde_json::to_string(entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
  }
}

impl EventLog {
  /// In-memory log holding at most `capacity` entries
  pub fn new(capacity: usize) -> Self {
    Self::build(capacity, None, false)
  }

  /// Log that also appends JSON lines to `path`, creating parent directories
  pub fn with_file<P: AsRef<Path>>(capacity: usize, path: P) -> std::io::Result<Self> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(&path)?;

    Ok(Self::build(capacity, Some(path), false))
  }

  /// In-memory log that never echoes to the console
  pub fn silent(capacity: usize) -> Self {
    Self::build(capacity, None, true)
  }

  fn build(capacity: usize, file: Option<PathBuf>, silent: bool) -> Self {
    Self {
      inner: Arc::new(Mutex::new(EventLogInner {
        entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
        capacity,
        file,
        silent,
      })),
    }
  }

  /// Stop or resume echoing entries to the console
  pub async fn set_silent(&self, silent: bool) {
    self.inner.lock().await.silent = silent;
  }

  /// Record an entry, returning persistence failures
  ///
  /// The entry is kept in memory even when appending to the file fails.
  pub async fn try_record(&self, level: Level, message: &str, component: &str) -> std::io::Result<()> {
    let entry = LogEntry {
      timestamp: Utc::now(),
      level,
      message: message.to_string(),
      component: component.to_string(),
    };

    let mut inner = self.inner.lock().await;
    if !inner.silent {
      crate::emit(level, &format!("[{component}] {message}"));
    }
    inner.push(entry)
  }

  /// Record an entry; persistence failures are reported on the console
  pub async fn record(&self, level: Level, message: &str, component: &str) {
    if let Err(e) = self.try_record(level, message, component).await {
      crate::emit(Level::Warn, &format!("Failed to persist log entry: {e}"));
    }
  }

  pub async fn info(&self, message: &str, component: &str) {
    self.record(Level::Info, message, component).await;
  }

  pub async fn success(&self, message: &str, component: &str) {
    self.record(Level::Success, message, component).await;
  }

  pub async fn warn(&self, message: &str, component: &str) {
    self.record(Level::Warn, message, component).await;
  }

  pub async fn error(&self, message: &str, component: &str) {
    self.record(Level::Error, message, component).await;
  }

  /// Most recent entries, oldest first, optionally restricted to one level
  pub async fn entries(&self, limit: Option<usize>, level: Option<Level>) -> Vec<LogEntry> {
    let inner = self.inner.lock().await;
    let matching: Vec<&LogEntry> =
      inner.entries.iter().filter(|entry| level.is_none_or(|l| entry.level == l)).collect();

    let skip = limit.map_or(0, |limit| matching.len().saturating_sub(limit));
    matching.into_iter().skip(skip).cloned().collect()
  }

  pub async fn len(&self) -> usize {
    self.inner.lock().await.entries.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}
