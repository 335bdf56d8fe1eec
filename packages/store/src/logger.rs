//! Leveled logging capability.
//!
//! The store does not pick a logging backend. It emits diagnostics through
//! the [`Logger`] trait and accepts any implementer at open time. When the
//! caller supplies none, a [`ConsoleLogger`] at [`Level::Info`] is used.
//! Embedders already running a `log`-crate backend can route store
//! diagnostics into it with [`LogFacade`].

use std::fmt;

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        write!(f, "{}", name)
    }
}

/// A provider of leveled diagnostic output.
///
/// Implementers supply [`Logger::log`]; the per-level methods are provided.
/// `Send + Sync` so a store can be shared across caller threads.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }
}

/// Console logger writing `[LEVEL] message` lines to stderr.
///
/// Messages above the threshold are dropped.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    threshold: Level,
}

impl ConsoleLogger {
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        if level <= self.threshold {
            eprintln!("[{}] {}", level, message);
        }
    }
}

/// Forwards store diagnostics to the `log` crate facade.
///
/// `log` has no fatal level; fatal maps to `log::error!`. Filtering is left
/// to whatever backend the embedder installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Fatal | Level::Error => log::error!("{}", message),
            Level::Warn => log::warn!("{}", message),
            Level::Info => log::info!("{}", message),
            Level::Debug => log::debug!("{}", message),
            Level::Trace => log::trace!("{}", message),
        }
    }
}
