//! Error types for the calculator core.

use thiserror::Error;

/// Why an expression could not be turned into a number.
///
/// These never reach the user as failures: the input is cleared and the
/// literal result token "Error" is shown instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    Overflow,
}

/// The history database could not be reached or refused an operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("history storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("history storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history storage is not open")]
    NotOpen,
}

/// A keystroke the input state machine does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("unknown token: {0:?}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown numeral script: {0:?} (expected english, nepali or limbu)")]
    Unknown(String),
}

#[derive(Debug, Error)]
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
        source: toml::de::Error,
    },
}
