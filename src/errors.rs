use std::path::{Path, PathBuf};
use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a store or command can surface.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Bad command-line value (dates, ids, enum names, JSON patches).
    #[error("Parse error: {0}")]
    Parse(String),

    /// No resolver or command match (CommandParser).
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Data files ---------------------------------------------------------
    /// A backing JSON document exists but cannot be decoded.
    #[error("Corrupt data file '{}': {reason}", path.display())]
    CorruptDataFile { path: PathBuf, reason: String },

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// Generic domain error when you want to bubble a message without a new variant.
    #[error("{0}")]
    Domain(String),

    /// IO passthrough (read/write files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (encode failures, value conversions).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn corrupt(path: &Path, reason: impl ToString) -> Self {
        Error::CorruptDataFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by what the user typed rather than by storage.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::UnknownCommand(_))
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}
