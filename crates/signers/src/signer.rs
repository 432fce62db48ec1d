//! Common signing capability of the signature scheme providers

use crate::SignerError;
use async_trait::async_trait;
use ethers::types::{
    transaction::{eip2718::TypedTransaction, eip712::TypedData},
    Address, Bytes, H256, U256,
};
use serde::{Deserialize, Serialize};

/// EIP-7702 authorization tuple
///
/// Only present so the capability surface can reject it explicitly; no
/// provider signs authorizations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub chain_id: U256,
    pub address: Address,
    pub nonce: U256,
}

/// Public material a signer exposes for on-chain identity resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicIdentity {
    /// EOA-style address recovered from a secp256k1 key
    Address(Address),
    /// Uncompressed (0x04-prefixed, 65-byte) secp256r1 public key
    P256PublicKey(Bytes),
    /// RSA public key as big-endian modulus and exponent bytes
    RsaPublicKey {
        modulus: Bytes,
        exponent: Bytes,
    },
}

/// Signing capability a smart account requires from its signature scheme
/// provider
///
/// A provider is constructed once per private key and owns that key for its
/// whole lifetime. Digest signing is synchronous and pure; the message and
/// typed data paths apply the standard EIP-191 / EIP-712 hashing first.
#[async_trait]
pub trait SmartAccountSigner: Send + Sync + std::fmt::Debug {
    /// Signs the given 32-byte digest
    fn sign_digest(&self, digest: H256) -> Result<Bytes, SignerError>;

    /// Signs the message with the EIP-191 personal message prefix
    async fn sign_message(&self, msg: &[u8]) -> Result<Bytes, SignerError>;

    /// Signs EIP-712 typed data
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, SignerError>;

    /// Native transaction signing; smart accounts never act as native
    /// transaction signers, so every provider rejects this
    async fn sign_transaction(&self, _tx: &TypedTransaction) -> Result<Bytes, SignerError> {
        Err(SignerError::UnsupportedOperation { operation: "sign_transaction" })
    }

    /// EIP-7702 authorization signing; rejected for the same reason as
    /// native transactions
    async fn sign_authorization(
        &self,
        _authorization: &Authorization,
    ) -> Result<Bytes, SignerError> {
        Err(SignerError::UnsupportedOperation { operation: "sign_authorization" })
    }

    /// Fixed placeholder signature used for gas estimation
    fn stub_signature(&self) -> Bytes;

    /// Public material identifying this signer on-chain
    fn public_identity(&self) -> PublicIdentity;
}

/// The 65-byte placeholder signature shared by the fixed-length schemes:
/// shaped like a maximal ECDSA signature so estimation never undercounts
/// calldata gas
pub(crate) fn stub_signature_65() -> Bytes {
    let mut stub = [0xff_u8; 65];
    stub[64] = 0x1c;
    Bytes::from(stub.to_vec())
}
