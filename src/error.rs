//! Error Handling for the Ember Scripting Language
//!
//! Defines the error type shared by every stage of the interpreter pipeline
//! (scanner, parser, interpreter) so the CLI front-end can dispatch on error
//! kind to choose an exit code without any stage needing to know about exit
//! codes itself.
//!
//! ## Error Categories
//!
//! - **`Lex`** — a scanning error (bad character, unterminated string). The
//!   scanner records these and keeps going rather than aborting.
//! - **`Parse`** — a syntax error, blamed on the offending token's line.
//! - **`Runtime`** — an evaluation-time error, blamed on the token that
//!   caused it.
//! - **`Io`** — wraps `std::io::Error` from the CLI's source-file read.

use std::error::Error;
use std::fmt;

/// Errors that can occur while scanning, parsing, or evaluating Ember source.
#[derive(Debug, Clone, PartialEq)]
pub enum EmberError {
    /// Lexical error during tokenization: bad character, unterminated string.
    Lex { message: String, line: usize },

    /// Syntax error during parsing.
    Parse { message: String, line: usize },

    /// Runtime error during evaluation, blamed on a source line.
    Runtime { message: String, line: usize },

    /// File system error reading the source file.
    Io(String),
}

impl EmberError {
    pub fn lex(message: impl Into<String>, line: usize) -> Self {
        EmberError::Lex { message: message.into(), line }
    }

    pub fn parse(message: impl Into<String>, line: usize) -> Self {
        EmberError::Parse { message: message.into(), line }
    }

    pub fn runtime(message: impl Into<String>, line: usize) -> Self {
        EmberError::Runtime { message: message.into(), line }
    }
}

impl fmt::Display for EmberError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmberError::Lex { message, line } => {
                write!(f, "[line {}] Error: {}", line, message)
            }
            EmberError::Parse { message, line } => write!(f, "[line {}] {}", line, message),
            EmberError::Runtime { message, line } => write!(f, "{}\n[line {}]", message, line),
            EmberError::Io(message) => write!(f, "{}", message),
        }
    }
}

impl Error for EmberError {}

impl From<std::io::Error> for EmberError {
    fn from(err: std::io::Error) -> Self {
        EmberError::Io(err.to_string())
    }
}

/// Convenience alias for `Result`s carrying an [`EmberError`].
pub type Result<T> = std::result::Result<T, EmberError>;
