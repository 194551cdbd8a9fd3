//! Lanegraph CLI
//!
//! Turns an instrumented event log into an SVG timeline diagram.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

use lanegraph::commands::{execute_render, validate_args, RenderArgs};
use lanegraph::utils::config::DEFAULT_CHUNK_SIZE;

/// Lanegraph - timeline diagrams from instrumented event logs
#[derive(Parser, Debug)]
#[command(name = "lanegraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read FILE as the input event log
    #[arg(short = 'i', long, value_name = "FILE")]
    input: PathBuf,

    /// Write FILE as the output SVG
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Start the timeline at MS milliseconds
    #[arg(short = 'a', long = "from-ms", value_name = "MS")]
    from_ms: Option<u64>,

    /// End the timeline at MS milliseconds
    #[arg(short = 'b', long = "to-ms", value_name = "MS")]
    to_ms: Option<u64>,

    /// Input read size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Exit status is 0 on success and 1 on any failure, usage errors
    // included, so clap's default exit codes are not used directly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                // --help and --version land here
                ExitCode::SUCCESS
            };
        }
    };

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let args = RenderArgs {
        input: cli.input,
        output: cli.output,
        from_ms: cli.from_ms,
        to_ms: cli.to_ms,
        chunk_size: cli.chunk_size,
        config: None,
    };

    validate_args(&args)?;
    execute_render(args)
}
