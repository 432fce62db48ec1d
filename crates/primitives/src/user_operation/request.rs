//! User operation request (optional fields)

use super::UserOperation;
use crate::utils::as_checksum_addr_opt;
use ethers::types::{Address, Bytes, H256, U256, U64};
use serde::{Deserialize, Serialize};

/// User operation with optional fields, as accepted at the signing boundary
///
/// The sender may be omitted and is resolved by the account; the chain id is
/// required for signing and its absence is a hard error there.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationRequest {
    #[serde(
        default,
        serialize_with = "as_checksum_addr_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub sender: Option<Address>,
    #[serde(default)]
    pub nonce: U256,
    #[serde(default)]
    pub init_code: Bytes,
    #[serde(default)]
    pub call_data: Bytes,
    #[serde(default)]
    pub account_gas_limits: Option<H256>,
    #[serde(default)]
    pub pre_verification_gas: Option<U256>,
    #[serde(default)]
    pub gas_fees: Option<H256>,
    #[serde(default)]
    pub paymaster_and_data: Bytes,
    #[serde(default)]
    pub signature: Option<Bytes>,
    /// Chain the operation is bound to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U64>,
}

impl UserOperationRequest {
    /// Sets the sender of the request
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the nonce of the request
    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the call data of the request
    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    /// Sets the chain id of the request
    pub fn chain_id(mut self, chain_id: U64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}

impl From<UserOperationRequest> for UserOperation {
    fn from(request: UserOperationRequest) -> Self {
        Self {
            sender: request.sender.unwrap_or_default(),
            nonce: request.nonce,
            init_code: request.init_code,
            call_data: request.call_data,
            account_gas_limits: request.account_gas_limits.unwrap_or_default(),
            pre_verification_gas: request.pre_verification_gas.unwrap_or_default(),
            gas_fees: request.gas_fees.unwrap_or_default(),
            paymaster_and_data: request.paymaster_and_data,
            signature: request.signature.unwrap_or_default(),
        }
    }
}

impl From<UserOperation> for UserOperationRequest {
    fn from(user_operation: UserOperation) -> Self {
        Self {
            sender: Some(user_operation.sender),
            nonce: user_operation.nonce,
            init_code: user_operation.init_code,
            call_data: user_operation.call_data,
            account_gas_limits: Some(user_operation.account_gas_limits),
            pre_verification_gas: Some(user_operation.pre_verification_gas),
            gas_fees: Some(user_operation.gas_fees),
            paymaster_and_data: user_operation.paymaster_and_data,
            signature: Some(user_operation.signature),
            chain_id: None,
        }
    }
}
