//! Timeline data model.
//!
//! This module owns the in-memory representation built during the decode
//! phase and consumed by the renderer:
//! - Lanes (one per monitored entity, in registration order)
//! - Intervals and instantaneous markers
//! - The optional rendering window

pub mod model;

// Re-export main types
pub use model::{InstantMarker, Interval, Lane, TimelineModel, Window};
