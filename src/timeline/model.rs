//! The in-memory timeline: lanes, intervals, markers, and the time window.
//!
//! The model is built incrementally by the event interpreter during the
//! decode phase, finalized exactly once at end-of-stream, and read-only
//! from then on. Lanes keep their registration order, which is also the
//! rendering order.

use crate::utils::error::{RenderError, SemanticError};
use std::collections::HashMap;

/// A contiguous time span on a lane with an associated state label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Start time in milliseconds
    pub start: u64,

    /// End time in milliseconds (>= start)
    pub end: u64,

    /// State label, used for coloring and tooltips
    pub state: String,
}

/// A zero-duration event, rendered as a point symbol rather than a bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantMarker {
    pub ts: u64,
    pub state: String,
}

/// An interval that has been opened but not yet closed
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenInterval {
    start: u64,
    state: String,
}

/// One monitored entity: a named row of intervals and markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    key: String,
    intervals: Vec<Interval>,
    markers: Vec<InstantMarker>,
    open: Option<OpenInterval>,
    last_ts: Option<u64>,
}

impl Lane {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            intervals: Vec::new(),
            markers: Vec::new(),
            open: None,
            last_ts: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Closed intervals, non-overlapping and ordered by start time
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn markers(&self) -> &[InstantMarker] {
        &self.markers
    }

    /// Per-lane monotonicity check: events never move backwards in time
    fn observe(&mut self, ts: u64) -> Result<(), SemanticError> {
        if let Some(last) = self.last_ts {
            if ts < last {
                return Err(SemanticError::TimestampRegressed {
                    lane: self.key.clone(),
                    ts,
                    last,
                });
            }
        }
        self.last_ts = Some(ts);
        Ok(())
    }
}

/// Owns all lanes plus the observed global timestamp range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineModel {
    lanes: Vec<Lane>,
    index: HashMap<String, usize>,
    min_ts: Option<u64>,
    max_ts: Option<u64>,
    finalized: bool,
}

impl TimelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lanes in registration order
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Smallest timestamp seen across all events, if any
    pub fn min_ts(&self) -> Option<u64> {
        self.min_ts
    }

    /// Largest timestamp seen across all events, if any
    pub fn max_ts(&self) -> Option<u64> {
        self.max_ts
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Register a lane, creating it on first reference (idempotent)
    pub fn register(&mut self, lane: &str, ts: u64) -> Result<(), SemanticError> {
        self.guard_mutable()?;
        self.lane_mut(lane).observe(ts)?;
        self.observe(ts);
        Ok(())
    }

    /// Open an interval on a lane
    ///
    /// # Errors
    /// * `SemanticError::IntervalAlreadyOpen` - the lane already has an open interval
    /// * `SemanticError::TimestampRegressed` - timestamp earlier than the lane's last
    pub fn open(&mut self, lane: &str, ts: u64, state: String) -> Result<(), SemanticError> {
        self.guard_mutable()?;
        let row = self.lane_mut(lane);
        if row.open.is_some() {
            return Err(SemanticError::IntervalAlreadyOpen {
                lane: lane.to_string(),
                ts,
            });
        }
        row.observe(ts)?;
        row.open = Some(OpenInterval { start: ts, state });
        self.observe(ts);
        Ok(())
    }

    /// Close the open interval on a lane, appending it to the lane's sequence
    ///
    /// # Errors
    /// * `SemanticError::NoIntervalToClose` - nothing is open on the lane
    /// * `SemanticError::TimestampRegressed` - timestamp earlier than the lane's last
    pub fn close(&mut self, lane: &str, ts: u64) -> Result<(), SemanticError> {
        self.guard_mutable()?;
        let row = self.lane_mut(lane);
        let opened = match row.open.take() {
            Some(opened) => opened,
            None => {
                return Err(SemanticError::NoIntervalToClose {
                    lane: lane.to_string(),
                    ts,
                })
            }
        };
        row.observe(ts)?;
        row.intervals.push(Interval {
            start: opened.start,
            end: ts,
            state: opened.state,
        });
        self.observe(ts);
        Ok(())
    }

    /// Append an instantaneous marker; no open/close bookkeeping
    pub fn mark(&mut self, lane: &str, ts: u64, state: String) -> Result<(), SemanticError> {
        self.guard_mutable()?;
        let row = self.lane_mut(lane);
        row.observe(ts)?;
        row.markers.push(InstantMarker { ts, state });
        self.observe(ts);
        Ok(())
    }

    /// Close every still-open interval at `last_ts` and mark the model read-only.
    ///
    /// Called exactly once, after the decode loop completes successfully.
    /// `last_ts` is the timestamp of the final successfully processed event.
    pub fn finalize(&mut self, last_ts: u64) -> Result<(), SemanticError> {
        self.guard_mutable()?;
        for row in &mut self.lanes {
            if let Some(opened) = row.open.take() {
                // last_ts can precede the open on another lane's clock
                let end = last_ts.max(opened.start);
                row.intervals.push(Interval {
                    start: opened.start,
                    end,
                    state: opened.state,
                });
            }
        }
        self.finalized = true;
        Ok(())
    }

    fn guard_mutable(&self) -> Result<(), SemanticError> {
        if self.finalized {
            return Err(SemanticError::AlreadyFinalized);
        }
        Ok(())
    }

    fn lane_mut(&mut self, key: &str) -> &mut Lane {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.lanes.push(Lane::new(key));
                let idx = self.lanes.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.lanes[idx]
    }

    fn observe(&mut self, ts: u64) {
        self.min_ts = Some(self.min_ts.map_or(ts, |min| min.min(ts)));
        self.max_ts = Some(self.max_ts.map_or(ts, |max| max.max(ts)));
    }
}

/// Requested rendering window in milliseconds; unset bounds default to the
/// model's observed range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub from_ms: Option<u64>,
    pub to_ms: Option<u64>,
}

impl Window {
    pub fn new(from_ms: Option<u64>, to_ms: Option<u64>) -> Self {
        Self { from_ms, to_ms }
    }

    /// Resolve to concrete bounds against a model's observed range
    ///
    /// # Errors
    /// * `RenderError::EmptyTimeline` - a bound is unset and the model saw no events
    /// * `RenderError::InvalidWindow` - resolved `from` is after `to`
    pub fn resolve(&self, model: &TimelineModel) -> Result<(u64, u64), RenderError> {
        let from = self
            .from_ms
            .or(model.min_ts())
            .ok_or(RenderError::EmptyTimeline)?;
        let to = self
            .to_ms
            .or(model.max_ts())
            .ok_or(RenderError::EmptyTimeline)?;
        if from > to {
            return Err(RenderError::InvalidWindow { from, to });
        }
        Ok((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_appends_interval() {
        let mut model = TimelineModel::new();
        model.open("gpu", 5, "busy".to_string()).unwrap();
        model.close("gpu", 12).unwrap();

        assert_eq!(model.lanes().len(), 1);
        assert_eq!(
            model.lanes()[0].intervals(),
            &[Interval {
                start: 5,
                end: 12,
                state: "busy".to_string()
            }]
        );
        assert_eq!(model.min_ts(), Some(5));
        assert_eq!(model.max_ts(), Some(12));
    }

    #[test]
    fn test_double_open_fails() {
        let mut model = TimelineModel::new();
        model.open("gpu", 1, "busy".to_string()).unwrap();
        let err = model.open("gpu", 2, "idle".to_string()).unwrap_err();
        assert_eq!(
            err,
            SemanticError::IntervalAlreadyOpen {
                lane: "gpu".to_string(),
                ts: 2
            }
        );
    }

    #[test]
    fn test_close_without_open_fails() {
        let mut model = TimelineModel::new();
        let err = model.close("gpu", 3).unwrap_err();
        assert_eq!(
            err,
            SemanticError::NoIntervalToClose {
                lane: "gpu".to_string(),
                ts: 3
            }
        );
    }

    #[test]
    fn test_timestamp_regression_fails() {
        let mut model = TimelineModel::new();
        model.mark("gpu", 10, "vblank".to_string()).unwrap();
        let err = model.mark("gpu", 4, "vblank".to_string()).unwrap_err();
        assert_eq!(
            err,
            SemanticError::TimestampRegressed {
                lane: "gpu".to_string(),
                ts: 4,
                last: 10
            }
        );
    }

    #[test]
    fn test_timestamps_independent_across_lanes() {
        let mut model = TimelineModel::new();
        model.mark("a", 100, "x".to_string()).unwrap();
        // A smaller timestamp on a different lane is fine
        model.mark("b", 10, "y".to_string()).unwrap();
        assert_eq!(model.min_ts(), Some(10));
        assert_eq!(model.max_ts(), Some(100));
    }

    #[test]
    fn test_finalize_closes_open_intervals() {
        let mut model = TimelineModel::new();
        model.open("gpu", 5, "busy".to_string()).unwrap();
        model.mark("cpu", 40, "tick".to_string()).unwrap();
        model.finalize(40).unwrap();

        assert!(model.is_finalized());
        assert_eq!(model.lanes()[0].intervals()[0].start, 5);
        assert_eq!(model.lanes()[0].intervals()[0].end, 40);
    }

    #[test]
    fn test_finalized_model_rejects_mutation() {
        let mut model = TimelineModel::new();
        model.mark("gpu", 1, "x".to_string()).unwrap();
        model.finalize(1).unwrap();

        assert_eq!(
            model.mark("gpu", 2, "x".to_string()),
            Err(SemanticError::AlreadyFinalized)
        );
        assert_eq!(model.finalize(2), Err(SemanticError::AlreadyFinalized));
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut model = TimelineModel::new();
        model.register("zeta", 0).unwrap();
        model.register("alpha", 1).unwrap();
        model.register("zeta", 2).unwrap();

        let keys: Vec<&str> = model.lanes().iter().map(|l| l.key()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_window_resolution() {
        let mut model = TimelineModel::new();
        model.mark("gpu", 10, "x".to_string()).unwrap();
        model.mark("gpu", 90, "x".to_string()).unwrap();

        assert_eq!(Window::default().resolve(&model), Ok((10, 90)));
        assert_eq!(Window::new(Some(20), None).resolve(&model), Ok((20, 90)));
        assert_eq!(Window::new(None, Some(50)).resolve(&model), Ok((10, 50)));
        assert_eq!(
            Window::new(Some(0), Some(200)).resolve(&model),
            Ok((0, 200))
        );
    }

    #[test]
    fn test_window_empty_model() {
        let model = TimelineModel::new();
        assert_eq!(
            Window::default().resolve(&model),
            Err(RenderError::EmptyTimeline)
        );
        // Fully explicit bounds do not need observed events
        assert_eq!(Window::new(Some(0), Some(10)).resolve(&model), Ok((0, 10)));
    }

    #[test]
    fn test_window_inverted_bounds() {
        let model = TimelineModel::new();
        assert_eq!(
            Window::new(Some(10), Some(5)).resolve(&model),
            Err(RenderError::InvalidWindow { from: 10, to: 5 })
        );
    }
}
