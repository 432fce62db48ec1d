//! Account composer errors

use ethers::{contract::ContractError, providers::Middleware};
use silex_primitives::CodecError;
use silex_signers::SignerError;
use thiserror::Error;

/// Errors surfaced by the smart account composer
///
/// Nothing is retried or suppressed; every failure propagates to the caller
/// with its kind and causing value intact.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Execution codec failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Signature scheme provider failure
    #[error(transparent)]
    Signer(#[from] SignerError),

    /// A required user operation field is absent
    #[error("missing user operation field: {field}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// Network client or contract call failure
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// Caller-supplied resolver failure, passed through unmodified
    #[error("resolver error: {0}")]
    Resolver(eyre::Report),
}

impl AccountError {
    /// Maps a contract call failure, keeping revert data in the message
    pub fn from_contract_error<M: Middleware>(err: ContractError<M>) -> Self {
        match err {
            ContractError::Revert(data) => {
                Self::Provider { inner: format!("execution reverted: {data}") }
            }
            other => Self::Provider { inner: other.to_string() },
        }
    }
}
