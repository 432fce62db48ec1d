//! Errors of the execution codec

use thiserror::Error;

/// Errors produced when packing or unpacking execution calldata
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// An empty execution is not representable
    #[error("cannot encode an empty list of calls")]
    EmptyCalls,

    /// Call type tag is not one of CALL, BATCH, DELEGATE
    #[error("unrecognized call type: {0:#04x}")]
    UnrecognizedCallType(u8),

    /// Exec type tag is not one of DEFAULT, TRY
    #[error("unrecognized exec type: {0:#04x}")]
    UnrecognizedExecType(u8),

    /// Input shorter than the fixed part of the packed layout
    #[error("packed execution too short: {got} bytes, expected at least {expected}")]
    InvalidLength {
        /// Length of the input
        got: usize,
        /// Minimum length of the packed shape
        expected: usize,
    },

    /// ABI decoding failed
    #[error("abi error: {inner}")]
    Abi {
        /// The inner error message
        inner: String,
    },
}
