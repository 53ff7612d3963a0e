//! Leveled console logging for the cinesearch services.
//!
//! Every line goes to stderr behind a short colored tag, so stdout stays free
//! for command output. Messages below the current threshold are dropped; the
//! threshold defaults to [`Level::Info`] and is raised or lowered with
//! [`set_level`].
//!
//! The macros take `format!` arguments:
//!
//! ```
//! marquee::info!("loaded {} records", 42);
//! marquee::warn!("cache at {}% capacity", 97);
//! ```
//!
//! With the `event-log` feature, [`event_log::EventLog`] keeps a bounded,
//! optionally persisted history of structured entries for the REST server.

use colored::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(feature = "event-log")]
pub mod event_log;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;

/// Severity of a log line, ordered from chattiest to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Verbose,
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl Level {
  pub fn as_str(&self) -> &'static str {
    match self {
      Level::Verbose => "verbose",
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "success",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  fn tag(&self) -> &'static str {
    match self {
      Level::Verbose => "verb",
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "sccs",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  fn color(&self) -> Color {
    match self {
      Level::Verbose => Color::Cyan,
      Level::Debug => Color::Magenta,
      Level::Info => Color::Blue,
      Level::Success => Color::Green,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
    }
  }

  fn from_u8(value: u8) -> Self {
    match value {
      0 => Level::Verbose,
      1 => Level::Debug,
      2 => Level::Info,
      3 => Level::Success,
      4 => Level::Warn,
      _ => Level::Error,
    }
  }
}

impl FromStr for Level {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "verbose" | "verb" => Ok(Level::Verbose),
      "debug" => Ok(Level::Debug),
      "info" => Ok(Level::Info),
      "success" | "sccs" => Ok(Level::Success),
      "warn" | "warning" => Ok(Level::Warn),
      "error" => Ok(Level::Error),
      other => Err(format!("unknown log level '{other}'")),
    }
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Set the lowest level that reaches the console
pub fn set_level(level: Level) {
  THRESHOLD.store(level as u8, Ordering::Relaxed);
}

/// Current console threshold
pub fn level() -> Level {
  Level::from_u8(THRESHOLD.load(Ordering::Relaxed))
}

/// Whether a message at `level` would currently be printed
pub fn enabled(level: Level) -> bool {
  level >= self::level()
}

fn format_prefix(level: Level) -> String {
  let tag = level.tag();
  format!("[{}]{:<width$}", tag.color(level.color()).bold(), "", width = 7 - tag.len() - 2)
}

/// Render one message into prefixed lines without printing them
pub fn render(level: Level, message: &str) -> Vec<String> {
  let prefix = format_prefix(level);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

/// Print a message at `level`, one prefixed stderr line per message line
pub fn emit(level: Level, message: &str) {
  if !enabled(level) {
    return;
  }

  for line in render(level, message) {
    eprintln!("{line}");
  }
}

pub fn verbose(message: &str) {
  emit(Level::Verbose, message);
}

pub fn debug(message: &str) {
  emit(Level::Debug, message);
}

pub fn info(message: &str) {
  emit(Level::Info, message);
}

pub fn success(message: &str) {
  emit(Level::Success, message);
}

pub fn warn(message: &str) {
  emit(Level::Warn, message);
}

pub fn error(message: &str) {
  emit(Level::Error, message);
}

/// Framed headline for startup and shutdown notices
pub fn announce(message: &str) {
  if !enabled(Level::Info) {
    return;
  }

  let width = message.lines().map(|l| l.chars().count()).max().unwrap_or(0).max(40);
  let border = "-".repeat(width);
  eprintln!("{}", border.blue().bold());
  for line in message.lines() {
    eprintln!("{}", line.blue().bold());
  }
  eprintln!("{}", border.blue().bold());
}

// Coverage-excluded call sites, same as the plain functions but with format args
#[macro_export]
macro_rules! verbose {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Verbose, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Debug, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Info, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Success, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Warn, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::emit($crate::Level::Error, &format!($($arg)*)) // LCOV_EXCL_LINE
  };
}
