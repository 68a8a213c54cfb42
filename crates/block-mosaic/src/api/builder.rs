//! The `BlockMosaic` engine and its two drivers.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use super::error::{panic_message, MosaicError, WorkerFault};
use super::mode::{ExecutionMode, TransformOutcome};
use crate::block::{average_block, BlockGrid};
use crate::buffer::{PixelBuffer, RowBand};
use crate::partition::{
    available_workers, plan_block_aligned_partitions, plan_partitions, Partition,
};
use crate::progress::{CancelToken, ProgressSink};

/// Block-averaging transform engine.
///
/// Holds the block size and run options; the image is passed to each run.
/// Both drivers mutate the buffer in place and report to a
/// [`ProgressSink`].
///
/// # Design
///
/// - Constructor validates the block size (no zero-sized blocks)
/// - Configuration methods consume and return `self`
/// - `run*` methods take `&self`, so one engine can transform many images
///
/// # Example
///
/// ```
/// use block_mosaic::{BlockMosaic, ExecutionMode, NoProgress, PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::from_pixels(
///     2,
///     1,
///     vec![Rgb::new(0, 0, 0), Rgb::new(101, 51, 1)],
/// )
/// .unwrap();
///
/// let outcome = BlockMosaic::new(2)
///     .unwrap()
///     .workers(4)
///     .run(&mut buffer, ExecutionMode::Parallel, &NoProgress)
///     .unwrap();
///
/// assert_eq!(outcome.blocks(), 1);
/// assert_eq!(buffer.get(0, 0), Some(Rgb::new(50, 25, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct BlockMosaic {
    square_size: usize,
    /// Explicit worker count; hardware concurrency when unset.
    workers: Option<usize>,
    /// Put partition seams on block-row boundaries.
    align_partitions: bool,
    pacing: Duration,
    cancel: CancelToken,
}

/// What one band's pass achieved.
#[derive(Debug, Clone, Copy)]
struct BandReport {
    blocks: usize,
    cancelled: bool,
}

impl BlockMosaic {
    /// Create an engine averaging `square_size x square_size` blocks.
    pub fn new(square_size: usize) -> Result<Self, MosaicError> {
        if square_size == 0 {
            return Err(MosaicError::InvalidBlockSize);
        }
        Ok(Self {
            square_size,
            workers: None,
            align_partitions: false,
            pacing: Duration::ZERO,
            cancel: CancelToken::new(),
        })
    }

    /// Use `count` workers in parallel mode instead of the hardware
    /// concurrency. Zero is treated as one.
    #[inline]
    pub fn workers(mut self, count: usize) -> Self {
        self.workers = Some(count.max(1));
        self
    }

    /// Place partition seams on multiples of the block size.
    ///
    /// By default rows are split `height / N` per worker and blocks are cut
    /// short at each seam, so parallel output can differ from sequential
    /// output near the seams. With alignment enabled no block is ever cut
    /// and both drivers write identical pixels.
    #[inline]
    pub fn align_partitions(mut self, enabled: bool) -> Self {
        self.align_partitions = enabled;
        self
    }

    /// Sleep for `delay` after every block.
    ///
    /// Only useful for watching progress on a display; zero (the default)
    /// never sleeps.
    #[inline]
    pub fn pacing(mut self, delay: Duration) -> Self {
        self.pacing = delay;
        self
    }

    /// Stop early when `token` is cancelled.
    #[inline]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    #[inline]
    pub fn square_size(&self) -> usize {
        self.square_size
    }

    /// Worker count a parallel run over `height` rows would use.
    pub fn worker_count(&self, height: usize) -> usize {
        self.partitions(height).len()
    }

    /// Row partitions a parallel run over `height` rows would use.
    pub fn partitions(&self, height: usize) -> Vec<Partition> {
        let workers = self.workers.unwrap_or_else(available_workers);
        if self.align_partitions {
            plan_block_aligned_partitions(height, workers, self.square_size)
        } else {
            plan_partitions(height, workers)
        }
    }

    /// Number of blocks a run will average, and therefore the number of
    /// `block_done` notifications it sends when not cancelled.
    ///
    /// Parallel runs can produce more blocks than sequential ones because
    /// blocks are cut at partition boundaries.
    pub fn planned_blocks(&self, width: usize, height: usize, mode: ExecutionMode) -> usize {
        match mode {
            ExecutionMode::Sequential => {
                BlockGrid::block_count(width, 0..height, self.square_size)
            }
            ExecutionMode::Parallel => self
                .partitions(height)
                .into_iter()
                .map(|p| BlockGrid::block_count(width, p.rows, self.square_size))
                .sum(),
        }
    }

    /// Run the transform with the selected driver.
    pub fn run(
        &self,
        buffer: &mut PixelBuffer,
        mode: ExecutionMode,
        sink: &dyn ProgressSink,
    ) -> Result<TransformOutcome, MosaicError> {
        match mode {
            ExecutionMode::Sequential => self.run_sequential(buffer, sink),
            ExecutionMode::Parallel => self.run_parallel(buffer, sink),
        }
    }

    /// Average every block in row-major order on the calling thread.
    ///
    /// Notifications arrive in the same left-to-right, top-to-bottom order
    /// as the blocks.
    pub fn run_sequential(
        &self,
        buffer: &mut PixelBuffer,
        sink: &dyn ProgressSink,
    ) -> Result<TransformOutcome, MosaicError> {
        let rows = 0..buffer.height();
        let mut band = buffer.as_band();
        let report =
            panic::catch_unwind(AssertUnwindSafe(|| self.process_band(&mut band, sink)))
                .map_err(|payload| {
                    MosaicError::WorkerFaults(vec![WorkerFault::from_panic(0, rows, payload)])
                })?;

        self.finish(vec![report], sink)
    }

    /// Average blocks with one thread per row partition.
    ///
    /// Each worker owns a disjoint [`RowBand`] and cuts its blocks at the
    /// band's last row, so no two workers ever read or write the same pixel.
    /// The result matches [`run_sequential`](Self::run_sequential) whenever
    /// the partition heights are multiples of the block size, which
    /// [`align_partitions`](Self::align_partitions) guarantees.
    /// Every worker is joined before returning, including when some fail.
    pub fn run_parallel(
        &self,
        buffer: &mut PixelBuffer,
        sink: &dyn ProgressSink,
    ) -> Result<TransformOutcome, MosaicError> {
        let partitions = self.partitions(buffer.height());
        let bands = buffer.split_into_bands(&partitions);

        tracing::debug!(
            workers = partitions.len(),
            square_size = self.square_size,
            "Starting parallel transform"
        );

        let results: Vec<Result<BandReport, WorkerFault>> = thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .iter()
                .zip(bands)
                .map(|(partition, mut band)| {
                    let handle = thread::Builder::new()
                        .name(format!("mosaic-worker-{}", partition.index))
                        .spawn_scoped(scope, move || {
                            let _span = tracing::debug_span!(
                                "partition",
                                index = partition.index,
                                rows = ?partition.rows
                            )
                            .entered();
                            self.process_band(&mut band, sink)
                        });
                    (partition, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(partition, handle)| match handle {
                    Ok(handle) => handle.join().map_err(|payload| {
                        WorkerFault::from_panic(partition.index, partition.rows.clone(), payload)
                    }),
                    Err(e) => Err(WorkerFault {
                        partition: partition.index,
                        rows: partition.rows.clone(),
                        message: format!("failed to spawn worker: {e}"),
                    }),
                })
                .collect()
        });

        let mut reports = Vec::with_capacity(results.len());
        let mut faults = Vec::new();
        for result in results {
            match result {
                Ok(report) => reports.push(report),
                Err(fault) => {
                    tracing::warn!(%fault, "Worker failed");
                    faults.push(fault);
                }
            }
        }
        if !faults.is_empty() {
            return Err(MosaicError::WorkerFaults(faults));
        }

        self.finish(reports, sink)
    }

    /// Row-major block loop over one band, checking for cancellation before
    /// each block.
    fn process_band(&self, band: &mut RowBand<'_>, sink: &dyn ProgressSink) -> BandReport {
        let mut blocks = 0;
        for block in BlockGrid::new(band.width(), band.row_range(), self.square_size) {
            if self.cancel.is_cancelled() {
                tracing::debug!(blocks, "Cancelled");
                return BandReport {
                    blocks,
                    cancelled: true,
                };
            }
            average_block(band, &block);
            blocks += 1;
            sink.block_done();
            if !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }
        }
        tracing::debug!(blocks, rows = ?band.row_range(), "Band done");
        BandReport {
            blocks,
            cancelled: false,
        }
    }

    /// Send the terminal notification and fold band reports into an outcome.
    fn finish(
        &self,
        reports: Vec<BandReport>,
        sink: &dyn ProgressSink,
    ) -> Result<TransformOutcome, MosaicError> {
        let blocks = reports.iter().map(|r| r.blocks).sum();
        let cancelled = reports.iter().any(|r| r.cancelled);
        panic::catch_unwind(AssertUnwindSafe(|| sink.finished())).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%message, "Progress sink failed on completion");
            MosaicError::SinkFault(message)
        })?;

        if cancelled {
            Ok(TransformOutcome::Cancelled { blocks })
        } else {
            Ok(TransformOutcome::Completed { blocks })
        }
    }
}
