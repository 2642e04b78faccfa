//! Error types for deck and dictionary operations.

use std::io;
use thiserror::Error;

/// Result type for hashcard store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading the dictionary or mutating a
/// deck file. None of these are retried; deck mutations that fail
/// leave the deck file in its pre-call state.
#[derive(Error, Debug)]
pub enum Error {
    /// An error originating from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A byte span that should have been UTF-8 text was not.
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidEncoding { offset: usize },

    /// The requested word has no line in the dictionary file.
    #[error("word '{word}' not found in dictionary")]
    WordNotFound { word: String },

    /// The requested key has no record in the deck file.
    #[error("no deck record for key '{key}'")]
    KeyNotFound { key: String },

    /// The dictionary scan ran out of unseen entries before the
    /// requested count was reached.
    #[error("dictionary has only {available} unseen entries, {required} required")]
    InsufficientEntries { required: u64, available: u64 },

    /// The cursor file exists but does not hold a decimal integer.
    #[error("cursor file does not contain a decimal integer: {value:?}")]
    InvalidCursor { value: String },

    /// A structural record pattern failed to compile.
    #[error("record pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
