//! Error types for the transform API.

use std::any::Any;
use std::ops::Range;

use thiserror::Error;

/// Errors returned by [`BlockMosaic`](crate::BlockMosaic).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// The block side length was zero.
    #[error("block size must be a positive integer")]
    InvalidBlockSize,

    /// One or more workers failed. Every worker was joined before this was
    /// returned; the buffer holds whatever the surviving workers wrote.
    #[error("{}", describe_faults(.0))]
    WorkerFaults(Vec<WorkerFault>),

    /// The sink panicked on the terminal `finished` notification. Every
    /// block had already been processed.
    #[error("progress sink failed on completion: {0}")]
    SinkFault(String),
}

/// A worker that stopped abnormally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("worker {partition} (rows {}..{}) failed: {message}", .rows.start, .rows.end)]
pub struct WorkerFault {
    /// Index of the partition the worker owned.
    pub partition: usize,
    /// Rows the worker owned.
    pub rows: Range<usize>,
    /// Panic message or spawn error.
    pub message: String,
}

impl WorkerFault {
    pub(crate) fn from_panic(
        partition: usize,
        rows: Range<usize>,
        payload: Box<dyn Any + Send>,
    ) -> Self {
        Self {
            partition,
            rows,
            message: panic_message(payload.as_ref()),
        }
    }
}

/// Text of a panic payload, for the usual `&str` and `String` payloads.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

fn describe_faults(faults: &[WorkerFault]) -> String {
    match faults {
        [] => "transform failed".to_string(),
        [fault] => fault.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(partition: usize, message: &str) -> WorkerFault {
        WorkerFault {
            partition,
            rows: 0..4,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_invalid_block_size_message() {
        assert_eq!(
            MosaicError::InvalidBlockSize.to_string(),
            "block size must be a positive integer"
        );
    }

    #[test]
    fn test_single_fault_message() {
        let err = MosaicError::WorkerFaults(vec![fault(2, "boom")]);
        assert_eq!(err.to_string(), "worker 2 (rows 0..4) failed: boom");
    }

    #[test]
    fn test_multiple_faults_message() {
        let err = MosaicError::WorkerFaults(vec![fault(0, "a"), fault(1, "b"), fault(3, "c")]);
        assert_eq!(
            err.to_string(),
            "worker 0 (rows 0..4) failed: a (and 2 more)"
        );
    }

    #[test]
    fn test_sink_fault_message() {
        assert_eq!(
            MosaicError::SinkFault("display gone".to_string()).to_string(),
            "progress sink failed on completion: display gone"
        );
    }

    #[test]
    fn test_panic_payload_downcasts() {
        let from_str = WorkerFault::from_panic(0, 0..1, Box::new("static"));
        assert_eq!(from_str.message, "static");

        let from_string = WorkerFault::from_panic(0, 0..1, Box::new(String::from("owned")));
        assert_eq!(from_string.message, "owned");

        let other = WorkerFault::from_panic(0, 0..1, Box::new(42u32));
        assert_eq!(other.message, "worker panicked");
    }
}
