//! Pluggable signature scheme providers for smart accounts
//!
//! Three providers implement a common signing capability: ECDSA (secp256k1),
//! P256 (secp256r1), and RSA. Each one signs 32-byte digests, EIP-191
//! messages, and EIP-712 typed data on behalf of an account, and produces a
//! fixed placeholder signature for gas estimation. Native transaction and
//! EIP-7702 authorization signing are rejected by every provider: smart
//! accounts are never native-transaction signers.

mod ecdsa;
mod error;
mod p256;
mod rsa;
mod signer;

pub use crate::{
    ecdsa::EcdsaSigner,
    error::SignerError,
    p256::P256Signer,
    rsa::RsaSigner,
    signer::{Authorization, PublicIdentity, SmartAccountSigner},
};
