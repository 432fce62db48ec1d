//! P256 (secp256r1) signature scheme provider

use crate::{
    signer::{stub_signature_65, PublicIdentity, SmartAccountSigner},
    SignerError,
};
use ::p256::ecdsa::SigningKey;
use async_trait::async_trait;
use ethers::{
    types::{
        transaction::eip712::{Eip712, TypedData},
        Bytes, H256,
    },
    utils::hash_message,
};
use std::fmt;

/// Signature scheme provider over the secp256r1 curve
///
/// Signatures are deterministic (RFC 6979) and low-S normalized, encoded as
/// r (32 bytes) then s (32 bytes) then a 0x1b/0x1c parity byte, the format
/// on-chain P256 validators consume.
#[derive(Clone)]
pub struct P256Signer {
    /// Signing key; owned exclusively for the provider's lifetime
    key: SigningKey,
}

impl fmt::Debug for P256Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("P256Signer").field("public_key", &self.public_key()).finish()
    }
}

impl P256Signer {
    /// Creates the provider from a signing key
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Creates the provider from a raw 32-byte private key scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|e| SignerError::InvalidKey { inner: e.to_string() })?;
        Ok(Self { key })
    }

    /// Uncompressed (0x04-prefixed, 65-byte) public key for address
    /// derivation by the caller
    pub fn public_key(&self) -> Bytes {
        self.key.verifying_key().to_encoded_point(false).as_bytes().to_vec().into()
    }
}

#[async_trait]
impl SmartAccountSigner for P256Signer {
    fn sign_digest(&self, digest: H256) -> Result<Bytes, SignerError> {
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(digest.as_bytes())?;
        let mut y_parity = recovery_id.is_y_odd();
        // negating s flips the parity of the recovered point
        let signature = match signature.normalize_s() {
            Some(normalized) => {
                y_parity = !y_parity;
                normalized
            }
            None => signature,
        };
        let (r, s) = signature.split_bytes();
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&r);
        out.extend_from_slice(&s);
        out.push(if y_parity { 0x1c } else { 0x1b });
        Ok(out.into())
    }

    async fn sign_message(&self, msg: &[u8]) -> Result<Bytes, SignerError> {
        self.sign_digest(hash_message(msg))
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, SignerError> {
        let digest = typed_data
            .encode_eip712()
            .map_err(|e| SignerError::Eip712 { inner: e.to_string() })?;
        self.sign_digest(H256(digest))
    }

    fn stub_signature(&self) -> Bytes {
        // P256 signatures are constant-length, so the ECDSA pattern fits
        stub_signature_65()
    }

    fn public_identity(&self) -> PublicIdentity {
        PublicIdentity::P256PublicKey(self.public_key())
    }
}
