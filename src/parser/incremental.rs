//! Resumable JSON-object decoder.
//!
//! Wraps serde_json as the tokenizing capability behind a three-way result:
//! object ready, need more input, or malformed input. The decoder owns all
//! continuation state, so a value split across arbitrarily many `feed` calls
//! resumes correctly without the caller replaying earlier bytes.
//!
//! Record boundary detection relies on the log contract fixing top-level
//! values to JSON objects, which are self-delimiting.

use crate::utils::error::ParseError;
use serde_json::Value;

/// Outcome of feeding one byte slice to the decoder
#[derive(Debug)]
pub enum FeedResult {
    /// A complete top-level value was decoded. `bytes_consumed` counts only
    /// bytes of the slice passed to this `feed` call; the remainder of the
    /// slice may hold the start of the next value and must be re-fed.
    Object { value: Value, bytes_consumed: usize },

    /// The slice was absorbed; feed the next chunk to continue.
    NeedMoreInput,
}

/// Decoder state persisting across `feed` calls
#[derive(Debug, Default)]
pub struct IncrementalDecoder {
    /// Bytes of an incomplete value carried over from earlier feeds.
    /// Replayed on the next feed; log records are small.
    pending: Vec<u8>,
}

impl IncrementalDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next byte slice.
    ///
    /// # Errors
    /// * `ParseError::Malformed` - the stream cannot be valid JSON
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FeedResult, ParseError> {
        let carried = self.pending.len();
        self.pending.extend_from_slice(bytes);

        let mut stream = serde_json::Deserializer::from_slice(&self.pending).into_iter::<Value>();
        let item = stream.next();
        let offset = stream.byte_offset();
        drop(stream);

        match item {
            Some(Ok(value)) => {
                let bytes_consumed = offset - carried;
                self.pending.clear();
                Ok(FeedResult::Object {
                    value,
                    bytes_consumed,
                })
            }
            Some(Err(e)) if e.is_eof() => Ok(FeedResult::NeedMoreInput),
            Some(Err(e)) => Err(ParseError::Malformed(e)),
            None => {
                // Nothing but whitespace so far; safe to drop
                self.pending.clear();
                Ok(FeedResult::NeedMoreInput)
            }
        }
    }

    /// True while the decoder holds the beginning of an unfinished value.
    /// End-of-file in this state means the input was truncated.
    pub fn has_partial_value(&self) -> bool {
        !self.pending.is_empty()
    }
}
