//! Wrapper around the entry point smart contract

use crate::{
    error::AccountError,
    gen::{EntryPointAPI, PackedUserOperation},
};
use ethers::{
    providers::Middleware,
    types::{Address, H256, U256},
};
use std::sync::Arc;

/// Entry point contract binding with the read paths this crate consumes
#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Reads the sender's current nonce for the given 192-bit key namespace
    pub async fn get_nonce(&self, sender: &Address, key: U256) -> Result<U256, AccountError> {
        self.entry_point_api
            .get_nonce(*sender, key)
            .call()
            .await
            .map_err(AccountError::from_contract_error)
    }

    /// Reads the account's deposit balance on the entry point
    pub async fn balance_of(&self, account: &Address) -> Result<U256, AccountError> {
        self.entry_point_api
            .balance_of(*account)
            .call()
            .await
            .map_err(AccountError::from_contract_error)
    }

    /// Computes the user operation hash on-chain (cross-check for the local
    /// hash computation)
    pub async fn get_user_op_hash<U: Into<PackedUserOperation>>(
        &self,
        uo: U,
    ) -> Result<H256, AccountError> {
        self.entry_point_api
            .get_user_op_hash(uo.into())
            .call()
            .await
            .map(H256)
            .map_err(AccountError::from_contract_error)
    }
}
