use std::path::PathBuf;

/// How a run ended when it did not fail fatally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every block was averaged and the result written to `output`.
    Completed { output: PathBuf, blocks: usize },

    /// Cancelled before all blocks were averaged; nothing was written.
    Cancelled { blocks: usize },

    /// The transform succeeded but the result could not be written.
    SaveFailed {
        output: PathBuf,
        blocks: usize,
        reason: String,
    },
}

impl RunOutcome {
    /// Process exit status.
    ///
    /// A failed save is reported but still exits 0: the image was
    /// transformed, only persisting it failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed { .. } | RunOutcome::SaveFailed { .. } => 0,
            RunOutcome::Cancelled { .. } => 130,
        }
    }

    pub fn blocks(&self) -> usize {
        match *self {
            RunOutcome::Completed { blocks, .. }
            | RunOutcome::Cancelled { blocks }
            | RunOutcome::SaveFailed { blocks, .. } => blocks,
        }
    }

    /// Line printed for the user once the run is over.
    pub fn message(&self) -> String {
        match self {
            RunOutcome::Completed { output, .. } => {
                format!("Processing complete. Result saved as '{}'.", output.display())
            }
            RunOutcome::Cancelled { blocks } => {
                format!("Processing cancelled after {blocks} blocks. No result saved.")
            }
            RunOutcome::SaveFailed { output, reason, .. } => {
                format!("Unable to save result to '{}': {reason}", output.display())
            }
        }
    }
}
