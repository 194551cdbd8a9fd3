//! SVG layout and document generation.
//!
//! Pure rendering only; file output lives in `output::svg`.

pub mod svg;

// Re-export main types
pub use svg::{render_timeline, TimelineConfig};
