//! Signer error types

use ethers::signers::WalletError;
use thiserror::Error;

/// Errors produced by the signature scheme providers
#[derive(Debug, Error)]
pub enum SignerError {
    /// Operation is not part of the smart account signing capability
    #[error("{operation} is not supported by smart account signers")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Supplied key material could not be used
    #[error("invalid key material: {inner}")]
    InvalidKey {
        /// The inner error message
        inner: String,
    },

    /// secp256k1 wallet failure
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// secp256r1 signing failure
    #[error("p256 error: {0}")]
    P256(#[from] ::p256::ecdsa::Error),

    /// RSA signing failure
    #[error("rsa error: {0}")]
    Rsa(#[from] ::rsa::Error),

    /// EIP-712 payload could not be hashed
    #[error("eip-712 error: {inner}")]
    Eip712 {
        /// The inner error message
        inner: String,
    },
}
