//! Errors
//!
//! The error taxonomy of the call surface. Validation errors raise
//! synchronously at the call site; external failures travel through the
//! exception outcome of a suspension.

use lumo_canvas::CanvasError;
use lumo_net::NetError;
use lumo_runtime::BridgeError;

/// Standard library error
#[derive(Debug, thiserror::Error)]
pub enum StdlibError {
    /// Wrong argument count at a contract-checked entry point.
    #[error("Invalid call to {func}: {required} arguments required but {given} given")]
    Arity {
        func: String,
        required: usize,
        given: usize,
    },

    /// Wrong argument kind at a contract-checked entry point.
    #[error("Invalid call to {func}: argument {index} expected {expected} but {found} given")]
    Type {
        func: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Wrong argument count at a method-style accessor.
    #[error("{func} expects {required} arguments, received {given}")]
    MethodArity {
        func: String,
        required: usize,
        given: usize,
    },

    /// An unexpected fault surfaced while validating a call. Still names
    /// the offending function.
    #[error("Invalid call to {func}: {detail}")]
    Contract { func: String, detail: String },

    /// A canvas drawing color failed validation.
    #[error("Invalid color value")]
    InvalidColor,

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Net(#[from] NetError),

    /// A suspending call was made while no program was executing.
    #[error("Program is not running")]
    NoActiveProgram,

    /// The program was stopped while an operation was in flight.
    #[error("Program stopped before the operation completed")]
    Stopped,

    /// An external operation failed; the message carries the cause.
    #[error("{0}")]
    External(String),
}

impl StdlibError {
    /// Generic contract failure naming the offending function, for faults
    /// that are neither arity nor kind mismatches.
    pub(crate) fn contract(func: &str, detail: impl Into<String>) -> Self {
        Self::Contract {
            func: func.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<BridgeError<StdlibError>> for StdlibError {
    fn from(err: BridgeError<StdlibError>) -> Self {
        match err {
            BridgeError::NoActiveProgram => Self::NoActiveProgram,
            BridgeError::Stopped => Self::Stopped,
            BridgeError::Raised(inner) => inner,
        }
    }
}
