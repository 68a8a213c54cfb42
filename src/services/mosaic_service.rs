use block_mosaic::{CancelToken, ExecutionMode, TransformOutcome};

use crate::error::AppError;
use crate::models::{RunConfig, RunOutcome};
use crate::services::image_io::{load_image, save_image};
use crate::services::ProgressDisplay;

/// Runs one load, transform, save cycle for a [`RunConfig`].
pub struct MosaicService {
    config: RunConfig,
    cancel: CancelToken,
}

impl MosaicService {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Token that stops the transform between blocks when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Load the image, average it and write the result.
    ///
    /// Decoding, the transform and encoding run on the blocking thread pool
    /// so the runtime stays free to drive the progress display and the
    /// Ctrl-C handler.
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        let engine = self.config.engine()?.cancel_token(self.cancel.clone());
        let mode = self.config.mode;

        let input = self.config.input.clone();
        let mut buffer = tokio::task::spawn_blocking(move || load_image(&input))
            .await
            .map_err(|e| AppError::Task(format!("Load task failed: {e}")))??;

        let (width, height) = (buffer.width(), buffer.height());
        let total = engine.planned_blocks(width, height, mode);
        tracing::info!(
            path = %self.config.input.display(),
            width,
            height,
            block_size = engine.square_size(),
            %mode,
            workers = match mode {
                ExecutionMode::Sequential => 1,
                ExecutionMode::Parallel => engine.worker_count(height),
            },
            blocks = total,
            "Processing image"
        );

        let display = ProgressDisplay::spawn(total);
        let sink = display.sink();
        let (buffer, result) = tokio::task::spawn_blocking(move || {
            let result = engine.run(&mut buffer, mode, &sink);
            (buffer, result)
        })
        .await
        .map_err(|e| AppError::Task(format!("Transform task failed: {e}")))?;

        let summary = display.finish().await?;
        tracing::debug!(
            blocks = summary.blocks,
            finished = summary.finished,
            "Progress display closed"
        );

        let blocks = match result? {
            TransformOutcome::Cancelled { blocks } => {
                tracing::warn!(blocks, total, "Processing cancelled");
                return Ok(RunOutcome::Cancelled { blocks });
            }
            TransformOutcome::Completed { blocks } => blocks,
        };

        let output = self.config.output.clone();
        let saved = {
            let output = output.clone();
            tokio::task::spawn_blocking(move || save_image(&buffer, &output))
                .await
                .map_err(|e| AppError::Task(format!("Save task failed: {e}")))?
        };

        match saved {
            Ok(()) => Ok(RunOutcome::Completed { output, blocks }),
            Err(e) => {
                tracing::error!(path = %output.display(), error = %e, "Failed to save result");
                Ok(RunOutcome::SaveFailed {
                    output,
                    blocks,
                    reason: e.to_string(),
                })
            }
        }
    }
}
