//! Configuration and constants for the CLI.

/// Current event log schema version (the contract owned by log producers)
pub const LOG_SCHEMA_VERSION: &str = "1.0.0";

/// Default size of one input read, in bytes.
/// Overridable from the CLI with --chunk-size.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

// SVG layout geometry, in pixels
pub const DEFAULT_CHART_WIDTH: usize = 1200;
pub const DEFAULT_LANE_HEIGHT: usize = 24;
pub const LABEL_COLUMN_WIDTH: usize = 140;
pub const RIGHT_MARGIN: usize = 20;
pub const TOP_MARGIN: usize = 40;
pub const AXIS_HEIGHT: usize = 44;
pub const LEGEND_HEIGHT: usize = 36;

/// Number of segments on the time axis (ticks drawn at each boundary)
pub const AXIS_TICKS: u64 = 10;

/// Fill colors assigned to state labels in first-seen order, cycling
pub const STATE_PALETTE: &[&str] = &[
    "rgb(70, 130, 180)",  // Steel Blue
    "rgb(220, 20, 60)",   // Crimson
    "rgb(34, 139, 34)",   // Forest Green
    "rgb(255, 140, 0)",   // Dark Orange
    "rgb(138, 43, 226)",  // Blue Violet
    "rgb(0, 139, 139)",   // Dark Cyan
    "rgb(255, 165, 0)",   // Orange
    "rgb(169, 169, 169)", // Gray
];
