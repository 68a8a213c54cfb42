//! Public API for the block-mosaic crate.
//!
//! This module provides the [`BlockMosaic`] engine, the [`ExecutionMode`]
//! selector and the error/outcome types a run can produce.

mod builder;
mod error;
mod mode;

pub use builder::BlockMosaic;
pub use error::{MosaicError, WorkerFault};
pub use mode::{ExecutionMode, ParseModeError, TransformOutcome};
