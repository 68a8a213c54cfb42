//! Execution strategy and run outcome types.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which driver runs the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// One thread, blocks in strict row-major order.
    #[default]
    Sequential,
    /// One worker thread per row partition.
    Parallel,
}

/// Mode string was neither `S` nor `M`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid processing mode {0:?}: use 'S' for single-threaded or 'M' for multi-threaded")]
pub struct ParseModeError(pub String);

impl FromStr for ExecutionMode {
    type Err = ParseModeError;

    /// Parses the single-letter selector, case-insensitively.
    ///
    /// ```
    /// use block_mosaic::ExecutionMode;
    ///
    /// assert_eq!("s".parse::<ExecutionMode>(), Ok(ExecutionMode::Sequential));
    /// assert_eq!("M".parse::<ExecutionMode>(), Ok(ExecutionMode::Parallel));
    /// assert!("X".parse::<ExecutionMode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("s") {
            Ok(ExecutionMode::Sequential)
        } else if s.eq_ignore_ascii_case("m") {
            Ok(ExecutionMode::Parallel)
        } else {
            Err(ParseModeError(s.to_string()))
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Parallel => f.write_str("parallel"),
        }
    }
}

/// How a transform ended when no worker faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Every block was averaged.
    Completed { blocks: usize },
    /// The cancel token fired; `blocks` were averaged before workers stopped.
    Cancelled { blocks: usize },
}

impl TransformOutcome {
    /// Blocks averaged during the run.
    pub fn blocks(&self) -> usize {
        match *self {
            TransformOutcome::Completed { blocks } | TransformOutcome::Cancelled { blocks } => {
                blocks
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransformOutcome::Cancelled { .. })
    }
}
