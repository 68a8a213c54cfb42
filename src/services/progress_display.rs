//! Terminal progress reporting.
//!
//! Worker threads cannot touch the display directly, so [`DisplaySink`]
//! only pushes events into a channel. A single tokio task drains it and
//! logs progress, which serializes all output onto one consumer.

use block_mosaic::{ProgressEvent, ProgressSink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppError;

/// Percentage between two progress lines.
const REPORT_STEP: usize = 10;

/// What the display saw over a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySummary {
    pub blocks: usize,
    pub finished: usize,
}

/// Owner of the display task.
pub struct ProgressDisplay {
    sender: mpsc::UnboundedSender<ProgressEvent>,
    task: JoinHandle<DisplaySummary>,
}

/// [`ProgressSink`] handed to the engine. Cheap to clone and safe to call
/// from any thread.
#[derive(Debug, Clone)]
pub struct DisplaySink {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSink for DisplaySink {
    fn block_done(&self) {
        // The receiver only goes away once the display is finished.
        let _ = self.sender.send(ProgressEvent::BlockDone);
    }

    fn finished(&self) {
        let _ = self.sender.send(ProgressEvent::Finished);
    }
}

impl ProgressDisplay {
    /// Start the display task for a run expected to average `total` blocks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(total: usize) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<ProgressEvent>();

        let task = tokio::spawn(async move {
            let mut summary = DisplaySummary::default();
            let mut next_report = REPORT_STEP;

            while let Some(event) = receiver.recv().await {
                match event {
                    ProgressEvent::BlockDone => {
                        summary.blocks += 1;
                        let percent = percent_done(summary.blocks, total);
                        if percent >= next_report {
                            tracing::info!(blocks = summary.blocks, total, "{percent}% done");
                            next_report = (percent / REPORT_STEP + 1) * REPORT_STEP;
                        }
                    }
                    ProgressEvent::Finished => {
                        summary.finished += 1;
                        tracing::info!(blocks = summary.blocks, total, "All workers finished");
                    }
                }
            }

            summary
        });

        Self { sender, task }
    }

    /// A sink feeding this display.
    pub fn sink(&self) -> DisplaySink {
        DisplaySink {
            sender: self.sender.clone(),
        }
    }

    /// Wait until every sink has been dropped and the channel is drained.
    pub async fn finish(self) -> Result<DisplaySummary, AppError> {
        drop(self.sender);
        self.task
            .await
            .map_err(|e| AppError::Task(format!("Progress display failed: {e}")))
    }
}

fn percent_done(blocks: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        (blocks.saturating_mul(100) / total).min(100)
    }
}
