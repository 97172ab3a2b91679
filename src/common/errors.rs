//! Error types returned by the library.
//!
//! Most public APIs return [`crate::Result`], which uses [`Error`] as the
//! error type.

use thiserror::Error;

/// Convenient result alias for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error surfaced by the library APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Errors encountered while parsing a textual IR file.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O failures when reading an input file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Errors loading the optional analysis config file.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors returned while parsing the textual IR grammar (spec.md §6).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An unrecognized character was found outside of a comment.
    #[error("line {line}: unexpected character {found:?}")]
    UnexpectedChar { line: usize, found: char },

    /// A token was found where a different one was expected.
    #[error("line {line}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// Block labels must be `0, 1, 2, ...` in file order.
    #[error("line {line}: block labeled .{found} out of order, expected .{expected}")]
    BlockOutOfOrder {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An integer literal did not fit the IR's numeric range.
    #[error("line {line}: integer literal {text:?} overflows a 31-bit value")]
    IntegerOverflow { line: usize, text: String },

    /// A branch named a block that does not exist in the file.
    #[error("line {line}: branch target .{target} does not exist")]
    UnknownBlock { line: usize, target: usize },

    /// The file ended while a token or instruction was still expected.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
}

/// Errors loading `AnalysisConfig` from a TOML file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: Box<toml::de::Error>,
    },
}
