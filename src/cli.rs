//! Command-line interface.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use block_mosaic::ExecutionMode;
use clap::Parser;

use crate::models::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "mosaic", version)]
#[command(about = "Replace every square block of an image with its average color")]
#[command(after_help = "Mode: 'S' for single-threaded, 'M' for multi-threaded")]
pub struct Cli {
    /// Image file to process
    pub image: PathBuf,

    /// Side length of the square blocks, in pixels
    #[arg(value_parser = parse_block_size, allow_negative_numbers = true)]
    pub block_size: usize,

    /// Processing mode: S (single-threaded) or M (multi-threaded)
    pub mode: ExecutionMode,

    /// Number of worker threads in M mode (defaults to the number of CPUs)
    #[arg(long, value_parser = parse_positive)]
    pub workers: Option<usize>,

    /// Delay after every block, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Output file (defaults to result.<input extension>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cut M mode partitions on block boundaries so the result matches S mode
    #[arg(long)]
    pub align_partitions: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let mut config = RunConfig::new(cli.image, cli.block_size, cli.mode);
        if let Some(output) = cli.output {
            config.output = output;
        }
        config.workers = cli.workers;
        config.pacing = Duration::from_millis(cli.delay_ms);
        config.align_partitions = cli.align_partitions;
        config
    }
}

/// Parse a full argument list (program name first) into a run configuration.
pub fn parse_args<I, T>(args: I) -> Result<RunConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(RunConfig::from)
}

fn parse_block_size(s: &str) -> Result<usize, String> {
    match s.parse::<i64>() {
        Ok(n) if n > 0 => {
            usize::try_from(n).map_err(|_| format!("block size {n} is too large"))
        }
        _ => Err("block size must be a positive integer".to_string()),
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("must be a positive integer".to_string()),
    }
}
