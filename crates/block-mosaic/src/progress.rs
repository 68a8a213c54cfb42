//! Progress notification and cooperative cancellation.
//!
//! The engine reports through a [`ProgressSink`]: one
//! [`block_done`](ProgressSink::block_done) per averaged block and a single
//! [`finished`](ProgressSink::finished) once every worker has stopped. In
//! parallel mode the sink is called from several worker threads at once, so
//! implementations must be `Sync`. A sink that drives a single-threaded
//! display is responsible for forwarding events to that display's thread.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// What a sink is being told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressEvent {
    /// One block has been averaged and written back.
    BlockDone,
    /// All blocks are done (or the run was cancelled and every worker stopped).
    Finished,
}

/// Receiver of progress notifications.
///
/// Any `Fn(ProgressEvent) + Sync` closure is a sink:
///
/// ```
/// use block_mosaic::{BlockMosaic, PixelBuffer, ProgressEvent, Rgb};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let blocks = AtomicUsize::new(0);
/// let sink = |event: ProgressEvent| {
///     if event == ProgressEvent::BlockDone {
///         blocks.fetch_add(1, Ordering::Relaxed);
///     }
/// };
///
/// let mut buffer = PixelBuffer::filled(8, 8, Rgb::new(255, 0, 0)).unwrap();
/// BlockMosaic::new(4).unwrap().run_sequential(&mut buffer, &sink).unwrap();
/// assert_eq!(blocks.load(Ordering::Relaxed), 4);
/// ```
pub trait ProgressSink: Sync {
    /// Called after each block.
    fn block_done(&self);

    /// Called exactly once after the last block.
    fn finished(&self);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Sync,
{
    fn block_done(&self) {
        self(ProgressEvent::BlockDone)
    }

    fn finished(&self) {
        self(ProgressEvent::Finished)
    }
}

/// Sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn block_done(&self) {}

    fn finished(&self) {}
}

/// Sink that counts notifications.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    blocks: AtomicUsize,
    finished: AtomicUsize,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `block_done` calls seen.
    pub fn blocks(&self) -> usize {
        self.blocks.load(Ordering::Acquire)
    }

    /// Number of `finished` calls seen.
    pub fn finish_count(&self) -> usize {
        self.finished.load(Ordering::Acquire)
    }
}

impl ProgressSink for ProgressCounter {
    fn block_done(&self) {
        self.blocks.fetch_add(1, Ordering::AcqRel);
    }

    fn finished(&self) {
        self.finished.fetch_add(1, Ordering::AcqRel);
    }
}

/// Shared flag asking a running transform to stop.
///
/// Workers check the token before every block. Cancelling never interrupts a
/// block half-way, so the image is always made of whole averaged blocks plus
/// untouched ones.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
