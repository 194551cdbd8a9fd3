//! The decode driving loop.
//!
//! Joins the chunk reader, the incremental decoder, and the event
//! interpreter into one pass over the input: feed the current unconsumed
//! slice, dispatch each completed object, and pull a fresh chunk whenever
//! the decoder asks for more. End-of-file with a value still in flight is
//! a truncated-input failure.

use super::chunk_reader::ChunkReader;
use super::incremental::{FeedResult, IncrementalDecoder};
use super::interpreter::EventInterpreter;
use crate::timeline::TimelineModel;
use crate::utils::error::{LogError, ParseError};
use log::debug;
use std::io::Read;

/// Decode a whole event log into a finalized timeline model
///
/// **Public** - main entry point for the decode/interpret phase
///
/// # Arguments
/// * `input` - the raw log byte stream
/// * `chunk_size` - how many bytes to pull per read
///
/// # Errors
/// * `LogError::Parse` - I/O failure, malformed JSON, or truncated input
/// * `LogError::Semantic` - a record that cannot be applied to the timeline
pub fn parse_log<R: Read>(input: R, chunk_size: usize) -> Result<TimelineModel, LogError> {
    let mut reader = ChunkReader::new(input, chunk_size);
    let mut decoder = IncrementalDecoder::new();
    let mut interpreter = EventInterpreter::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];

    loop {
        let len = reader.read_next(&mut chunk).map_err(ParseError::Io)?;
        if len == 0 {
            break;
        }

        let mut offset = 0;
        while offset < len {
            match decoder.feed(&chunk[offset..len]).map_err(LogError::Parse)? {
                FeedResult::Object {
                    value,
                    bytes_consumed,
                } => {
                    interpreter.process(value)?;
                    offset += bytes_consumed;
                }
                // Rest of the chunk is carried inside the decoder
                FeedResult::NeedMoreInput => break,
            }
        }
    }

    if decoder.has_partial_value() {
        return Err(ParseError::TruncatedInput.into());
    }

    debug!("decoded {} records", interpreter.records_processed());
    Ok(interpreter.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = concat!(
        r#"{"op":"open","lane":"A","ts":0,"state":"busy"}"#,
        r#"{"op":"mark","lane":"B","ts":4,"state":"tick"}"#,
        "\n",
        r#"{"op":"close","lane":"A","ts":10}"#,
    );

    #[test]
    fn test_parse_whole_log() {
        let model = parse_log(Cursor::new(LOG), 8192).unwrap();
        assert_eq!(model.lanes().len(), 2);
        assert_eq!(model.lanes()[0].key(), "A");
        assert_eq!(model.lanes()[0].intervals()[0].end, 10);
        assert_eq!(model.lanes()[1].markers()[0].ts, 4);
        assert_eq!((model.min_ts(), model.max_ts()), (Some(0), Some(10)));
    }

    #[test]
    fn test_empty_input_yields_empty_model() {
        let model = parse_log(Cursor::new(""), 16).unwrap();
        assert!(model.lanes().is_empty());
        assert!(model.is_finalized());
    }

    #[test]
    fn test_truncated_input_fails() {
        let input = r#"{"op":"mark","lane":"A","ts":1,"#;
        let err = parse_log(Cursor::new(input), 8).unwrap_err();
        assert!(matches!(
            err,
            LogError::Parse(ParseError::TruncatedInput)
        ));
    }

    #[test]
    fn test_malformed_input_fails() {
        let input = r#"{"op":"mark","lane":"A","ts":1,"state":"x"} {garbage}"#;
        let err = parse_log(Cursor::new(input), 8192).unwrap_err();
        assert!(matches!(err, LogError::Parse(ParseError::Malformed(_))));
    }

    #[test]
    fn test_non_object_record_fails_semantically() {
        let err = parse_log(Cursor::new("[1, 2]"), 8192).unwrap_err();
        assert!(matches!(err, LogError::Semantic(_)));
    }
}
