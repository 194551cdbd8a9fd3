//! Event log decoding and interpretation.
//!
//! This module handles:
//! - Chunked reads from the input log
//! - Resumable JSON decoding across chunk boundaries
//! - Classifying records against the log schema
//! - Applying records to the timeline model

pub mod chunk_reader;
pub mod event_log;
pub mod incremental;
pub mod interpreter;
pub mod schema;

// Re-export main types
pub use chunk_reader::ChunkReader;
pub use event_log::parse_log;
pub use incremental::{FeedResult, IncrementalDecoder};
pub use interpreter::EventInterpreter;
pub use schema::{LogRecord, Op};
