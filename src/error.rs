//! error types for board construction, replay decoding and settings loading
use std::path::PathBuf;

use thiserror::Error;

/// Board construction errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[allow(missing_docs)]
    #[error("board dimensions must be positive, got {rows} rows by {cols} columns")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// A structurally invalid replay log. Line numbers are 1-based and count
/// every line of the file, header included.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("replay log is empty")]
    Empty,

    #[error("line {line}: expected 3 to 5 `_`-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid score `{value}`")]
    Score { line: usize, value: String },

    #[error("line {line}: invalid coordinate `{value}`, expected `i,j`")]
    Coordinate { line: usize, value: String },
}

/// Replay file errors, always naming the file involved
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ReplayError {
    #[error("failed to parse replay log {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IO error on replay log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings errors. These are recovered by substituting defaults and are
/// never fatal to a game.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("IO error on settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings field {0} is missing")]
    MissingField(usize),

    #[error("invalid board density code `{0}`")]
    InvalidDensity(String),

    #[error("invalid speed code `{0}`")]
    InvalidSpeed(String),

    #[error("invalid color `{value}` in settings field {index}")]
    InvalidColor { index: usize, value: String },
}
