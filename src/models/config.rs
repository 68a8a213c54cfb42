use std::path::{Path, PathBuf};
use std::time::Duration;

use block_mosaic::{BlockMosaic, ExecutionMode, MosaicError};

/// Validated settings for one mosaic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Source image
    pub input: PathBuf,

    /// Side length of the averaging blocks, always positive
    pub block_size: usize,

    pub mode: ExecutionMode,

    /// Where the result is written
    pub output: PathBuf,

    /// Parallel worker override; `None` uses the hardware concurrency
    pub workers: Option<usize>,

    /// Sleep after every block, zero for none
    pub pacing: Duration,

    /// Split parallel partitions on block-row boundaries
    pub align_partitions: bool,
}

impl RunConfig {
    /// Config with the defaults the CLI applies when no flags are given.
    pub fn new(input: impl Into<PathBuf>, block_size: usize, mode: ExecutionMode) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self {
            input,
            block_size,
            mode,
            output,
            workers: None,
            pacing: Duration::ZERO,
            align_partitions: false,
        }
    }

    /// Build the engine these settings describe.
    pub fn engine(&self) -> Result<BlockMosaic, MosaicError> {
        let mut engine = BlockMosaic::new(self.block_size)?
            .pacing(self.pacing)
            .align_partitions(self.align_partitions);
        if let Some(workers) = self.workers {
            engine = engine.workers(workers);
        }
        Ok(engine)
    }
}

/// `result.<ext>` in the working directory, keeping the input's extension
/// (lower-cased) so the encoder picks the same format. Inputs without an
/// extension get `result.png`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "png".to_string());
    PathBuf::from(format!("result.{ext}"))
}
