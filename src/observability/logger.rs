//! Structured JSON logger
//!
//! Per OBSERVABILITY.md:
//! - One log line = one event
//! - Synchronous, unbuffered
//! - `event` first, then `level`, then caller fields in caller order
//! - ERROR and FATAL go to stderr, everything else to stdout

use std::fmt;
use std::io::{self, Write};

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Protocol-step detail.
    Trace = 0,
    /// Normal lifecycle events.
    Info = 1,
    /// Recoverable oddities.
    Warn = 2,
    /// Operation failures.
    Error = 3,
    /// Broken internal invariants.
    Fatal = 4,
}

impl Level {
    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The process-wide structured logger.
///
/// Stateless; every call renders and writes one complete line. Logging
/// failure is swallowed — observability must never fail an operation
/// (OBSERVABILITY.md).
pub struct Logger;

impl Logger {
    /// Logs one event at the given level.
    pub fn log(level: Level, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(level, event, fields);
        if level >= Level::Error {
            let _ = io::stderr().write_all(line.as_bytes());
        } else {
            let _ = io::stdout().write_all(line.as_bytes());
        }
    }

    /// Logs at TRACE level.
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Trace, event, fields);
    }

    /// Logs at INFO level.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Info, event, fields);
    }

    /// Logs at WARN level.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Warn, event, fields);
    }

    /// Logs at ERROR level.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Error, event, fields);
    }

    /// Logs at FATAL level.
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Fatal, event, fields);
    }

    /// Renders one line, newline-terminated.
    ///
    /// Fields stay in caller order; callers keep that order stable per
    /// event, which makes identical events byte-identical.
    pub fn render(level: Level, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(64 + 16 * fields.len());

        line.push_str("{\"event\":\"");
        Self::push_escaped(&mut line, event);
        line.push_str("\",\"level\":\"");
        line.push_str(level.as_str());
        line.push('"');

        for (key, value) in fields {
            line.push_str(",\"");
            Self::push_escaped(&mut line, key);
            line.push_str("\":\"");
            Self::push_escaped(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");
        line
    }

    fn push_escaped(out: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    use std::fmt::Write;
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
    }
}
