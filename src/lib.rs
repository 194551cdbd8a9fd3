//! Lanegraph
//!
//! Timeline diagram generation from instrumented event logs.
//!
//! Converts a log of timestamped state-change events (concatenated JSON
//! objects) into a static SVG timeline: one horizontal lane per monitored
//! entity, colored interval bars over a millisecond axis, optionally
//! clipped to a requested window.
//!
//! This crate provides the core implementation for the `lanegraph` CLI
//! tool; the pieces compose as
//! `parser::parse_log` -> `render::render_timeline` -> `output::write_svg`.

pub mod commands;
pub mod output;
pub mod parser;
pub mod render;
pub mod timeline;
pub mod utils;
