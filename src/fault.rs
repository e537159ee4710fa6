//! Fault taxonomy and terminal error reporting.
//!
//! Faults are raised by generated code when it detects a type or range
//! violation. Every fault is fatal: the diagnostic line goes to stderr and
//! the process exits with the fault code as its status.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::error::RuntimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("comparison operator got non-number")]
    ComparisonNonNumber,

    #[error("arithmetic operator got non-number")]
    ArithmeticNonNumber,

    #[error("if condition got non-boolean")]
    IfNonBoolean,

    #[error("Integer overflow")]
    Overflow,

    #[error("not a tuple")]
    NotATuple,

    #[error("index too small")]
    IndexTooSmall,

    #[error("index too large")]
    IndexTooLarge,

    #[error("Unknown error code: {0}")]
    Unknown(i32),
}

impl Fault {
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Fault::ComparisonNonNumber,
            1 => Fault::ArithmeticNonNumber,
            2 => Fault::IfNonBoolean,
            3 => Fault::Overflow,
            4 => Fault::NotATuple,
            5 => Fault::IndexTooSmall,
            6 => Fault::IndexTooLarge,
            other => Fault::Unknown(other),
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            Fault::ComparisonNonNumber => 0,
            Fault::ArithmeticNonNumber => 1,
            Fault::IfNonBoolean => 2,
            Fault::Overflow => 3,
            Fault::NotATuple => 4,
            Fault::IndexTooSmall => 5,
            Fault::IndexTooLarge => 6,
            Fault::Unknown(code) => *code,
        }
    }

    /// Process exit status for this fault.
    ///
    /// Equal to the code, so `ComparisonNonNumber` exits with 0.
    pub const fn exit_status(&self) -> i32 {
        self.code()
    }
}

/// Write the diagnostic for `error`.
///
/// Known fault codes are written without a trailing newline; every other
/// error, including an unknown fault code, ends its line.
pub fn write_report<W: Write>(out: &mut W, error: &RuntimeError) -> io::Result<()> {
    match error {
        RuntimeError::Fault(Fault::Unknown(_)) => writeln!(out, "Error: {}", error)?,
        RuntimeError::Fault(_) => write!(out, "Error: {}", error)?,
        _ => writeln!(out, "Error: {}", error)?,
    }
    out.flush()
}

/// Report `error` on stderr and exit. Never returns.
pub fn terminate(error: &RuntimeError) -> ! {
    let status = error.exit_status();
    debug!(status, %error, "terminating");

    // Output already printed by generated code must not be lost.
    let _ = io::stdout().flush();
    let _ = write_report(&mut io::stderr().lock(), error);
    std::process::exit(status)
}
