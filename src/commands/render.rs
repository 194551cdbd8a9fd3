//! Render command implementation.
//!
//! The render command:
//! 1. Opens the input event log
//! 2. Decodes and interprets it into a timeline model
//! 3. Renders the finalized model to SVG over the requested window
//! 4. Writes the output file
//!
//! Decoding runs to completion before rendering begins; the output file is
//! only created after the whole document has been rendered in memory, so a
//! failure anywhere leaves no partial output behind.

use crate::output::write_svg;
use crate::parser::parse_log;
use crate::render::{render_timeline, TimelineConfig};
use crate::timeline::Window;
use crate::utils::config::{DEFAULT_CHUNK_SIZE, LOG_SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Path to the input event log
    pub input: PathBuf,

    /// Path to the output SVG file
    pub output: PathBuf,

    /// Window start in milliseconds (None = observed minimum)
    pub from_ms: Option<u64>,

    /// Window end in milliseconds (None = observed maximum)
    pub to_ms: Option<u64>,

    /// Input read size in bytes
    pub chunk_size: usize,

    /// Timeline rendering configuration (None = defaults)
    pub config: Option<TimelineConfig>,
}

impl RenderArgs {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            from_ms: None,
            to_ms: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            config: None,
        }
    }
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input open/read failures
/// * Malformed or truncated JSON
/// * Records that violate open/close sequencing
/// * Output write failures
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Input log: {}", args.input.display());
    debug!("Expecting log schema v{}", LOG_SCHEMA_VERSION);

    // Step 1: Decode and interpret the whole log
    info!("Step 1/3: Decoding event log...");
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input log {}", args.input.display()))?;
    let model = parse_log(file, args.chunk_size)
        .with_context(|| format!("Failed to decode event log {}", args.input.display()))?;

    debug!(
        "Model: {} lanes, observed range [{:?}, {:?}] ms",
        model.lanes().len(),
        model.min_ts(),
        model.max_ts()
    );

    // Step 2: Render the finalized model
    info!("Step 2/3: Rendering timeline...");
    let window = Window::new(args.from_ms, args.to_ms);
    let svg = render_timeline(&model, window, args.config.as_ref())
        .context("Failed to render timeline")?;

    // Step 3: Write the document
    info!("Step 3/3: Writing output file...");
    write_svg(&svg, &args.output)
        .with_context(|| format!("Failed to write SVG {}", args.output.display()))?;

    info!("✓ Timeline written to: {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.chunk_size == 0 {
        anyhow::bail!("Chunk size must be greater than 0");
    }

    if let (Some(from), Some(to)) = (args.from_ms, args.to_ms) {
        if from > to {
            anyhow::bail!("--from-ms ({}) must not be after --to-ms ({})", from, to);
        }
    }

    Ok(())
}
