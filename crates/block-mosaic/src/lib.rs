//! block-mosaic: block-averaging mosaic transform
//!
//! Replaces every `square_size x square_size` block of an RGB image with the
//! block's average color, in place, either on the calling thread or with one
//! worker thread per row partition.
//!
//! # Quick Start
//!
//! ```
//! use block_mosaic::{BlockMosaic, ExecutionMode, PixelBuffer, ProgressCounter, Rgb};
//!
//! let mut buffer = PixelBuffer::filled(10, 10, Rgb::new(40, 80, 120)).unwrap();
//! let progress = ProgressCounter::new();
//!
//! let outcome = BlockMosaic::new(4)
//!     .unwrap()
//!     .run(&mut buffer, ExecutionMode::Sequential, &progress)
//!     .unwrap();
//!
//! // 3 x 3 blocks: 4, 4 and 2 pixels wide/high.
//! assert_eq!(outcome.blocks(), 9);
//! assert_eq!(progress.blocks(), 9);
//! assert_eq!(progress.finish_count(), 1);
//! ```
//!
//! # Blocks
//!
//! Blocks sit on a grid anchored at `(0, 0)` with stride `square_size`. The
//! last column and row are truncated rather than padded, so a `10x10` image
//! with `square_size = 4` is covered by
//!
//! ```text
//! 4x4  4x4  2x4
//! 4x4  4x4  2x4
//! 4x2  4x2  2x2
//! ```
//!
//! A block's color is the per-channel mean of its samples, summed in `u64`
//! and truncated (`{10, 11, 12, 13}` -> `11`).
//!
//! # Drivers
//!
//! | Mode | Threads | Notification order |
//! |------|---------|--------------------|
//! | [`ExecutionMode::Sequential`] | caller | row-major |
//! | [`ExecutionMode::Parallel`] | one per partition | row-major within a partition, interleaved across partitions |
//!
//! The parallel driver splits the rows into `N` partitions (`height / N` rows
//! each, the last one taking the remainder) and hands each worker a disjoint
//! [`RowBand`]. Blocks are cut at the partition's last row, so a worker never
//! reads or writes another worker's rows. The borrow checker enforces this:
//! bands are produced with `split_at_mut` and no locking is involved.
//!
//! Cutting blocks at seams means the parallel output differs from the
//! sequential one wherever a seam falls inside a block row. Enable
//! [`BlockMosaic::align_partitions`] to put seams on block-row boundaries;
//! both drivers then produce identical pixels.
//!
//! # Progress and cancellation
//!
//! A [`ProgressSink`] gets one `block_done` per block and one `finished` at
//! the end. A [`CancelToken`] is checked before every block; cancelled runs
//! return [`TransformOutcome::Cancelled`] after every worker has stopped.
//! Worker panics are caught, all workers are still joined, and the panics are
//! returned together as [`MosaicError::WorkerFaults`].

pub mod api;
pub mod block;
pub mod buffer;
pub mod partition;
pub mod progress;


pub use api::{
    BlockMosaic, ExecutionMode, MosaicError, ParseModeError, TransformOutcome, WorkerFault,
};
pub use block::{average_block, average_color, fill_block, Block, BlockGrid};
pub use buffer::{BufferError, PixelBuffer, Rgb, RowBand};
pub use partition::{
    available_workers, plan_block_aligned_partitions, plan_partitions, Partition,
};
pub use progress::{CancelToken, NoProgress, ProgressCounter, ProgressEvent, ProgressSink};
