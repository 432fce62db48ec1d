//! Basic transaction type for account abstraction (ERC-4337), packed
//! (entry point v0.7) layout

mod hash;
mod request;

use crate::utils::{as_checksum_addr, get_address, pack_uint128, unpack_uint128};
use ethers::{
    abi::AbiEncode,
    contract::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
pub use hash::UserOperationHash;
pub use request::UserOperationRequest;
use serde::{Deserialize, Serialize};

/// User operation in the packed layout consumed by the entry point
///
/// `account_gas_limits` carries verification gas limit and call gas limit as
/// two big-endian uint128 halves; `gas_fees` carries max priority fee and
/// max fee the same way.
#[derive(
    Default,
    Clone,
    Debug,
    Ord,
    PartialOrd,
    PartialEq,
    Eq,
    EthAbiCodec,
    EthAbiType,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    /// Sender of the user operation
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,

    /// Nonce (anti replay protection)
    pub nonce: U256,

    /// Factory address and factory data (needed if account not yet deployed
    /// and needs to be created)
    pub init_code: Bytes,

    /// The data that is passed to the sender during the main execution call
    pub call_data: Bytes,

    /// Verification gas limit and call gas limit, packed
    pub account_gas_limits: H256,

    /// The amount of gas to pay bundler to compensate for the
    /// pre-verification execution and calldata
    pub pre_verification_gas: U256,

    /// Max priority fee per gas and max fee per gas, packed
    pub gas_fees: H256,

    /// Address of paymaster sponsoring the user operation, followed by its
    /// gas limits and extra data (can be empty)
    pub paymaster_and_data: Bytes,

    /// Data passed to the account along with the nonce during the
    /// verification step
    pub signature: Bytes,
}

/// User operation without signature (helper for packing user operation)
#[derive(EthAbiCodec, EthAbiType)]
struct UserOperationNoSignature {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: H256,
    pub call_data: H256,
    pub account_gas_limits: H256,
    pub pre_verification_gas: U256,
    pub gas_fees: H256,
    pub paymaster_and_data: H256,
}

impl From<UserOperation> for UserOperationNoSignature {
    fn from(value: UserOperation) -> Self {
        Self {
            sender: value.sender,
            nonce: value.nonce,
            init_code: keccak256(&value.init_code).into(),
            call_data: keccak256(&value.call_data).into(),
            account_gas_limits: value.account_gas_limits,
            pre_verification_gas: value.pre_verification_gas,
            gas_fees: value.gas_fees,
            paymaster_and_data: keccak256(&value.paymaster_and_data).into(),
        }
    }
}

impl UserOperation {
    /// Packs the user operation into bytes
    pub fn pack(&self) -> Bytes {
        self.clone().encode().into()
    }

    /// Packs the user operation without signature to bytes (used for
    /// calculating the hash)
    pub fn pack_without_signature(&self) -> Bytes {
        let user_operation_packed = UserOperationNoSignature::from(self.clone());
        user_operation_packed.encode().into()
    }

    /// Calculates the hash of the user operation
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        H256::from_slice(
            keccak256(
                [
                    keccak256(&self.pack_without_signature()).to_vec(),
                    entry_point.encode(),
                    U256::from(chain_id).encode(),
                ]
                .concat(),
            )
            .as_slice(),
        )
        .into()
    }

    // Builder pattern helpers

    /// Sets the sender of the user operation
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    /// Sets the nonce of the user operation
    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the init code of the user operation
    pub fn init_code(mut self, init_code: Bytes) -> Self {
        self.init_code = init_code;
        self
    }

    /// Sets the call data of the user operation
    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    /// Sets the packed account gas limits of the user operation
    pub fn account_gas_limits(mut self, account_gas_limits: H256) -> Self {
        self.account_gas_limits = account_gas_limits;
        self
    }

    /// Sets the verification gas limit and call gas limit, packing them
    pub fn gas_limits(mut self, verification_gas_limit: U256, call_gas_limit: U256) -> Self {
        self.account_gas_limits = H256(pack_uint128(verification_gas_limit, call_gas_limit));
        self
    }

    /// Sets the pre-verification gas of the user operation
    pub fn pre_verification_gas(mut self, pre_verification_gas: U256) -> Self {
        self.pre_verification_gas = pre_verification_gas;
        self
    }

    /// Sets the packed gas fees of the user operation
    pub fn gas_fees(mut self, gas_fees: H256) -> Self {
        self.gas_fees = gas_fees;
        self
    }

    /// Sets the max priority fee per gas and max fee per gas, packing them
    pub fn fees(mut self, max_priority_fee_per_gas: U256, max_fee_per_gas: U256) -> Self {
        self.gas_fees = H256(pack_uint128(max_priority_fee_per_gas, max_fee_per_gas));
        self
    }

    /// Sets the paymaster and data of the user operation
    pub fn paymaster_and_data(mut self, paymaster_and_data: Bytes) -> Self {
        self.paymaster_and_data = paymaster_and_data;
        self
    }

    /// Sets the signature of the user operation
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }

    /// Gets the verification gas limit of the user operation
    pub fn verification_gas_limit(&self) -> U256 {
        unpack_uint128(self.account_gas_limits.as_bytes()).0
    }

    /// Gets the call gas limit of the user operation
    pub fn call_gas_limit(&self) -> U256 {
        unpack_uint128(self.account_gas_limits.as_bytes()).1
    }

    /// Gets the max priority fee per gas of the user operation
    pub fn max_priority_fee_per_gas(&self) -> U256 {
        unpack_uint128(self.gas_fees.as_bytes()).0
    }

    /// Gets the max fee per gas of the user operation
    pub fn max_fee_per_gas(&self) -> U256 {
        unpack_uint128(self.gas_fees.as_bytes()).1
    }

    /// Gets the entities (optionally if present) involved in the user
    /// operation
    pub fn get_entities(&self) -> (Address, Option<Address>, Option<Address>) {
        let sender = self.sender;
        let factory = get_address(&self.init_code);
        let paymaster = get_address(&self.paymaster_and_data);
        (sender, factory, paymaster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ENTRY_POINT: &str = "0x0000000071727De22E5E9d8BAf0edAc6f37da032";
    const CHAIN_ID: u64 = 11155111;

    fn uo_fixture() -> UserOperation {
        UserOperation::default()
            .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
            .nonce(1.into())
            .call_data("0xe9ae5c5300000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000003400000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000000000000000000000000000000".parse().unwrap())
            .gas_limits(100_000.into(), 33_100.into())
            .pre_verification_gas(44_056.into())
            .fees(1_695_000_000.into(), 1_695_000_030.into())
    }

    #[test]
    fn user_operation_pack() {
        assert_eq!(
            uo_fixture().pack(),
            "0x0000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c000000000000000000000000000000000000000000000000000000000000000100000000000000000000000000000000000000000000000000000000000001200000000000000000000000000000000000000000000000000000000000000140000000000000000000000000000186a00000000000000000000000000000814c000000000000000000000000000000000000000000000000000000000000ac180000000000000000000000006507a5c00000000000000000000000006507a5de00000000000000000000000000000000000000000000000000000000000002200000000000000000000000000000000000000000000000000000000000000240000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000a4e9ae5c53000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000400000000000000000000000000000000000000000000000000000000000000034000000000000000000000000000000000000000100000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn user_operation_pack_without_signature() {
        assert_eq!(
            uo_fixture().pack_without_signature(),
            "0x0000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c0000000000000000000000000000000000000000000000000000000000000001c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a4709556d94169d783f963874bc15c20bfcaada20c9a66ca4b5738a146921cd214d6000000000000000000000000000186a00000000000000000000000000000814c000000000000000000000000000000000000000000000000000000000000ac180000000000000000000000006507a5c00000000000000000000000006507a5dec5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
                .parse::<Bytes>()
                .unwrap()
        );
        assert_eq!(
            UserOperation::default()
                .gas_limits(100_000.into(), U256::zero())
                .pre_verification_gas(21_000.into())
                .fees(1_000_000_000.into(), U256::zero())
                .pack_without_signature(),
            "0x00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470000000000000000000000000000186a00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000052080000000000000000000000003b9aca0000000000000000000000000000000000c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn user_operation_hash() {
        assert_eq!(
            uo_fixture().hash(&ENTRY_POINT.parse().unwrap(), CHAIN_ID),
            UserOperationHash::from_str(
                "0x65671a2f321c7439b93cc61324264105cf1eca21f9c7bca973fa41eba7e1db72"
            )
            .unwrap()
        );
        assert_eq!(
            UserOperation::default()
                .gas_limits(100_000.into(), U256::zero())
                .pre_verification_gas(21_000.into())
                .fees(1_000_000_000.into(), U256::zero())
                .hash(&ENTRY_POINT.parse().unwrap(), CHAIN_ID),
            UserOperationHash::from_str(
                "0xc364e5f96a0bc0a3ffd7066bb4e48c1ec65eba16077c1149065ad9bef4f5baa2"
            )
            .unwrap()
        );
    }

    #[test]
    fn gas_fields_unpack() {
        let uo = uo_fixture();
        assert_eq!(uo.verification_gas_limit(), 100_000.into());
        assert_eq!(uo.call_gas_limit(), 33_100.into());
        assert_eq!(uo.max_priority_fee_per_gas(), 1_695_000_000.into());
        assert_eq!(uo.max_fee_per_gas(), 1_695_000_030.into());
    }

    #[test]
    fn entities_from_packed_fields() {
        let factory: Address = "0x9406Cc6185a346906296840746125a0E44976454".parse().unwrap();
        let uo = uo_fixture()
            .init_code(crate::pack_factory_data(factory, &"0x1234".parse().unwrap()));
        let (sender, parsed_factory, paymaster) = uo.get_entities();
        assert_eq!(sender, uo.sender);
        assert_eq!(parsed_factory, Some(factory));
        assert_eq!(paymaster, None);
    }
}
