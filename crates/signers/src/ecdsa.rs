//! ECDSA (secp256k1) signature scheme provider

use crate::{
    signer::{stub_signature_65, PublicIdentity, SmartAccountSigner},
    SignerError,
};
use async_trait::async_trait;
use ethers::{
    prelude::k256::ecdsa::SigningKey,
    signers::{Signer, Wallet},
    types::{transaction::eip712::TypedData, Address, Bytes, H256},
};

/// Signature scheme provider backed by a standard secp256k1 wallet
///
/// All signing is delegated to the wrapped wallet; the provider only
/// contributes the fixed stub signature used for gas estimation.
#[derive(Clone, Debug)]
pub struct EcdsaSigner {
    /// Signing wallet
    wallet: Wallet<SigningKey>,
}

impl EcdsaSigner {
    /// Creates the provider from an existing wallet
    pub fn new(wallet: Wallet<SigningKey>) -> Self {
        Self { wallet }
    }

    /// Address of the underlying wallet
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

#[async_trait]
impl SmartAccountSigner for EcdsaSigner {
    fn sign_digest(&self, digest: H256) -> Result<Bytes, SignerError> {
        let signature = self.wallet.sign_hash(digest)?;
        Ok(signature.to_vec().into())
    }

    async fn sign_message(&self, msg: &[u8]) -> Result<Bytes, SignerError> {
        let signature = self.wallet.sign_message(msg).await?;
        Ok(signature.to_vec().into())
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, SignerError> {
        let signature = self.wallet.sign_typed_data(typed_data).await?;
        Ok(signature.to_vec().into())
    }

    fn stub_signature(&self) -> Bytes {
        stub_signature_65()
    }

    fn public_identity(&self) -> PublicIdentity {
        PublicIdentity::Address(self.wallet.address())
    }
}
