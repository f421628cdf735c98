//! Tagged console logger with colored badges.
//!
//! ```text
//! panelgen:success Wrote panel.d.ts
//! panelgen Loaded 3 snapshots
//! ```

use colored::{Color, Colorize};
use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

const DEFAULT_COLOR: Color = Color::TrueColor { r: 127, g: 140, b: 141 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    Error,
    Warn,
    Log,
    Info,
    Success,
}

impl LogType {
    /// 0 is the most severe
    pub fn level(self) -> u8 {
        match self {
            LogType::Error => 0,
            LogType::Warn => 1,
            LogType::Log => 2,
            LogType::Info | LogType::Success => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Error => "error",
            LogType::Warn => "warn",
            LogType::Log => "log",
            LogType::Info => "info",
            LogType::Success => "success",
        }
    }

    fn color(self) -> Color {
        if self == LogType::Success {
            return Color::TrueColor { r: 46, g: 204, b: 113 };
        }
        match self.level() {
            0 => Color::TrueColor { r: 192, g: 57, b: 43 },
            1 => Color::TrueColor { r: 243, g: 156, b: 18 },
            2 => Color::TrueColor { r: 0, g: 188, b: 212 },
            _ => DEFAULT_COLOR,
        }
    }
}

/// Logger that prefixes every message with a `tag:type` badge.
///
/// Errors go to the error stream, everything else to the output stream.
pub struct Logger<O = Stdout, E = Stderr> {
    tag: String,
    out: O,
    err: E,
    colors: bool,
}

impl Logger {
    pub fn new(tag: impl Into<String>) -> Self {
        Logger::with_writers(tag, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Logger<O, E> {
    pub fn with_writers(tag: impl Into<String>, out: O, err: E) -> Self {
        Self {
            tag: tag.into(),
            out,
            err,
            colors: true,
        }
    }

    /// Replace the output stream, e.g. to keep stdout free for generated code
    pub fn with_output<W: Write>(self, out: W) -> Logger<W, E> {
        Logger {
            tag: self.tag,
            out,
            err: self.err,
            colors: self.colors,
        }
    }

    /// Plain `[tag:type]` badges without terminal colors
    pub fn plain(mut self) -> Self {
        self.colors = false;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn errors(&self) -> &E {
        &self.err
    }

    pub fn error(&mut self, message: impl Display) {
        self.emit(LogType::Error, message);
    }

    pub fn warn(&mut self, message: impl Display) {
        self.emit(LogType::Warn, message);
    }

    pub fn log(&mut self, message: impl Display) {
        self.emit(LogType::Log, message);
    }

    pub fn info(&mut self, message: impl Display) {
        self.emit(LogType::Info, message);
    }

    pub fn success(&mut self, message: impl Display) {
        self.emit(LogType::Success, message);
    }

    pub fn emit(&mut self, log_type: LogType, message: impl Display) {
        let badge = self.badge(log_type);
        let line = match (badge.is_empty(), self.colors) {
            (true, _) => message.to_string(),
            (false, true) => format!(
                "{} {}",
                format!(" {} ", badge).white().bold().on_color(log_type.color()),
                message
            ),
            (false, false) => format!("[{}] {}", badge, message),
        };

        // Write errors are ignored
        let _ = if log_type.level() < 1 {
            writeln!(self.err, "{}", line)
        } else {
            writeln!(self.out, "{}", line)
        };
    }

    fn badge(&self, log_type: LogType) -> String {
        let kind = if log_type == LogType::Log { "" } else { log_type.as_str() };
        [self.tag.as_str(), kind]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(":")
    }
}
