//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding the event log byte stream
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON in event log: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("truncated input: end of file inside a JSON value")]
    TruncatedInput,
}

/// Errors raised when a decoded record cannot be applied to the timeline
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SemanticError {
    #[error("unrecognized record shape: {0}")]
    UnrecognizedRecord(String),

    #[error("'{op}' record is missing the required 'state' field")]
    MissingState { op: &'static str },

    #[error("interval already open on lane '{lane}' at t={ts}ms")]
    IntervalAlreadyOpen { lane: String, ts: u64 },

    #[error("no interval to close on lane '{lane}' at t={ts}ms")]
    NoIntervalToClose { lane: String, ts: u64 },

    #[error("timestamp regressed on lane '{lane}': t={ts}ms after t={last}ms")]
    TimestampRegressed { lane: String, ts: u64, last: u64 },

    #[error("timeline model is finalized and read-only")]
    AlreadyFinalized,
}

/// Combined failure of the decode/interpret phase
#[derive(Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Errors that can occur during timeline rendering
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("timeline model must be finalized before rendering")]
    NotFinalized,

    #[error("timeline is empty and no explicit window was given")]
    EmptyTimeline,

    #[error("invalid window: from={from}ms is after to={to}ms")]
    InvalidWindow { from: u64, to: u64 },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
