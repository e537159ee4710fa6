use std::io;

use thiserror::Error;

use crate::fault::Fault;
use crate::heap::HeapError;

//===----------------------------------------------------------------------===//
// RuntimeError
//===----------------------------------------------------------------------===//

/// Unrecoverable errors. Library code returns them up to the top-level
/// handler, which reports and exits; nothing resumes after one.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Fault(#[from] Fault),

    #[error("{0}")]
    Heap(#[from] HeapError),

    #[error("runtime called before an arena was installed")]
    ArenaNotInstalled,

    #[error("an arena is already installed on this thread")]
    ArenaAlreadyInstalled,

    #[error("output failed: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    /// Status for errors that are not producer faults (`EX_SOFTWARE`).
    pub const INTERNAL_STATUS: i32 = 70;

    pub fn exit_status(&self) -> i32 {
        match self {
            RuntimeError::Fault(fault) => fault.exit_status(),
            _ => Self::INTERNAL_STATUS,
        }
    }
}
