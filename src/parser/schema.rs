//! Event log record schema.
//!
//! This is the versioned contract between log producers and this tool
//! (`LOG_SCHEMA_VERSION` in `utils::config`). A log is a sequence of JSON
//! objects, concatenated with no required delimiter:
//!
//! ```json
//! {"op": "register", "lane": "gpu", "ts": 0}
//! {"op": "open",     "lane": "gpu", "ts": 5,  "state": "busy"}
//! {"op": "close",    "lane": "gpu", "ts": 40}
//! {"op": "mark",     "lane": "gpu", "ts": 12, "state": "vblank"}
//! ```
//!
//! - `op`: one of `register`, `open`, `close`, `mark`
//! - `lane`: lane key; the first mention of a key creates the lane
//! - `ts`: timestamp in milliseconds
//! - `state`: state label, required for `open` and `mark`
//!
//! Unknown extra fields are tolerated for forward compatibility; an unknown
//! `op` or a missing required field aborts the run.

use serde::Deserialize;

/// Timeline operation named by a record's `op` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Create the lane if absent (idempotent)
    Register,
    /// Start an interval; requires `state`
    Open,
    /// End the lane's open interval
    Close,
    /// Instantaneous marker; requires `state`
    Mark,
}

/// One decoded log record
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    pub op: Op,
    pub lane: String,
    pub ts: u64,
    #[serde(default)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes() {
        let record: LogRecord =
            serde_json::from_str(r#"{"op":"open","lane":"gpu","ts":5,"state":"busy"}"#).unwrap();
        assert_eq!(record.op, Op::Open);
        assert_eq!(record.lane, "gpu");
        assert_eq!(record.ts, 5);
        assert_eq!(record.state.as_deref(), Some("busy"));
    }

    #[test]
    fn test_state_is_optional() {
        let record: LogRecord =
            serde_json::from_str(r#"{"op":"close","lane":"gpu","ts":9}"#).unwrap();
        assert_eq!(record.op, Op::Close);
        assert!(record.state.is_none());
    }

    #[test]
    fn test_extra_fields_tolerated() {
        let record: LogRecord =
            serde_json::from_str(r#"{"op":"register","lane":"gpu","ts":0,"pid":1234}"#).unwrap();
        assert_eq!(record.op, Op::Register);
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result: Result<LogRecord, _> =
            serde_json::from_str(r#"{"op":"pause","lane":"gpu","ts":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        let result: Result<LogRecord, _> = serde_json::from_str(r#"{"op":"mark","lane":"gpu"}"#);
        assert!(result.is_err());
    }
}
