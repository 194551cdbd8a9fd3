//! Maps decoded JSON objects onto timeline operations.
//!
//! The interpreter classifies each record against the log schema and applies
//! it to the model. Processing is fail-fast: any record that cannot be
//! classified or applied aborts the run with a `SemanticError`; nothing is
//! skipped or recovered.

use super::schema::{LogRecord, Op};
use crate::timeline::TimelineModel;
use crate::utils::error::SemanticError;
use log::trace;
use serde_json::Value;

/// Applies decoded records to a timeline model, one at a time
#[derive(Debug, Default)]
pub struct EventInterpreter {
    model: TimelineModel,
    last_ts: Option<u64>,
    records: u64,
}

impl EventInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records successfully applied so far
    pub fn records_processed(&self) -> u64 {
        self.records
    }

    /// Classify one decoded object and apply it to the model
    ///
    /// # Errors
    /// * `SemanticError::UnrecognizedRecord` - the object does not match the log schema
    /// * `SemanticError::MissingState` - `open`/`mark` without a state label
    /// * any bookkeeping error from the model (open/close sequencing, regression)
    pub fn process(&mut self, object: Value) -> Result<(), SemanticError> {
        let record: LogRecord = serde_json::from_value(object)
            .map_err(|e| SemanticError::UnrecognizedRecord(e.to_string()))?;

        trace!("applying {:?} on lane '{}' at t={}ms", record.op, record.lane, record.ts);

        match record.op {
            Op::Register => self.model.register(&record.lane, record.ts)?,
            Op::Open => {
                let state = record
                    .state
                    .ok_or(SemanticError::MissingState { op: "open" })?;
                self.model.open(&record.lane, record.ts, state)?;
            }
            Op::Close => self.model.close(&record.lane, record.ts)?,
            Op::Mark => {
                let state = record
                    .state
                    .ok_or(SemanticError::MissingState { op: "mark" })?;
                self.model.mark(&record.lane, record.ts, state)?;
            }
        }

        self.last_ts = Some(record.ts);
        self.records += 1;
        Ok(())
    }

    /// Finalize the model at the last successfully processed timestamp and
    /// hand it over read-only
    pub fn finish(self) -> Result<TimelineModel, SemanticError> {
        let mut model = self.model;
        model.finalize(self.last_ts.unwrap_or(0))?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_close_sequence() {
        let mut interp = EventInterpreter::new();
        interp
            .process(json!({"op": "open", "lane": "a", "ts": 0, "state": "busy"}))
            .unwrap();
        interp
            .process(json!({"op": "close", "lane": "a", "ts": 10}))
            .unwrap();
        assert_eq!(interp.records_processed(), 2);

        let model = interp.finish().unwrap();
        assert!(model.is_finalized());
        assert_eq!(model.lanes()[0].intervals()[0].end, 10);
    }

    #[test]
    fn test_open_without_state_fails() {
        let mut interp = EventInterpreter::new();
        let err = interp
            .process(json!({"op": "open", "lane": "a", "ts": 0}))
            .unwrap_err();
        assert_eq!(err, SemanticError::MissingState { op: "open" });
    }

    #[test]
    fn test_non_object_value_fails() {
        let mut interp = EventInterpreter::new();
        let err = interp.process(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SemanticError::UnrecognizedRecord(_)));
    }

    #[test]
    fn test_unknown_op_fails() {
        let mut interp = EventInterpreter::new();
        let err = interp
            .process(json!({"op": "suspend", "lane": "a", "ts": 0}))
            .unwrap_err();
        assert!(matches!(err, SemanticError::UnrecognizedRecord(_)));
    }

    #[test]
    fn test_finish_closes_dangling_interval_at_last_event() {
        let mut interp = EventInterpreter::new();
        interp
            .process(json!({"op": "open", "lane": "a", "ts": 5, "state": "busy"}))
            .unwrap();
        interp
            .process(json!({"op": "mark", "lane": "b", "ts": 40, "state": "tick"}))
            .unwrap();

        let model = interp.finish().unwrap();
        let interval = &model.lanes()[0].intervals()[0];
        assert_eq!((interval.start, interval.end), (5, 40));
    }

    #[test]
    fn test_finish_on_empty_stream() {
        let model = EventInterpreter::new().finish().unwrap();
        assert!(model.is_finalized());
        assert!(model.lanes().is_empty());
        assert_eq!(model.min_ts(), None);
    }
}
