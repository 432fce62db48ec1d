//! Execution types and the packed calldata codec
//!
//! An `Execution` is one call performed by the account: target address,
//! native value, and calldata. Three packed shapes exist, selected by the
//! mode word: single call, ABI-encoded batch, and delegate call (which
//! carries no value).

use crate::{utils::as_checksum_addr, CodecError};
use ethers::{
    abi::{AbiDecode, AbiEncode},
    contract::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, U256},
};
use serde::{Deserialize, Serialize};

/// A single call performed by the account
#[derive(
    Clone, Debug, Default, PartialEq, Eq, EthAbiCodec, EthAbiType, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Call target
    #[serde(serialize_with = "as_checksum_addr")]
    pub target: Address,
    /// Native value sent with the call
    pub value: U256,
    /// Calldata passed to the target
    pub call_data: Bytes,
}

impl Execution {
    /// Creates an execution
    pub fn new(target: Address, value: U256, call_data: Bytes) -> Self {
        Self { target, value, call_data }
    }

    /// Packs for single-call execution: target, value as 32 big-endian
    /// bytes, then calldata
    pub fn pack_single(&self) -> Bytes {
        let mut value = [0u8; 32];
        self.value.to_big_endian(&mut value);
        [self.target.as_bytes(), value.as_slice(), self.call_data.as_ref()].concat().into()
    }

    /// Unpacks a single-call execution
    pub fn unpack_single(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < 52 {
            return Err(CodecError::InvalidLength { got: buf.len(), expected: 52 });
        }
        Ok(Self {
            target: Address::from_slice(&buf[0..20]),
            value: U256::from_big_endian(&buf[20..52]),
            call_data: if buf.len() > 52 {
                Bytes::from(buf[52..].to_vec())
            } else {
                Bytes::default()
            },
        })
    }

    /// Packs for delegate-call execution: target then calldata; delegate
    /// calls carry no value
    pub fn pack_delegate(&self) -> Bytes {
        [self.target.as_bytes(), self.call_data.as_ref()].concat().into()
    }

    /// Unpacks a delegate-call execution; value is always zero
    pub fn unpack_delegate(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < 20 {
            return Err(CodecError::InvalidLength { got: buf.len(), expected: 20 });
        }
        Ok(Self {
            target: Address::from_slice(&buf[0..20]),
            value: U256::zero(),
            call_data: if buf.len() > 20 {
                Bytes::from(buf[20..].to_vec())
            } else {
                Bytes::default()
            },
        })
    }
}

/// Packs executions as the ABI array of `(address,uint256,bytes)` tuples
pub fn pack_batch(executions: Vec<Execution>) -> Bytes {
    executions.encode().into()
}

/// Unpacks an ABI-encoded batch; order is preserved
pub fn unpack_batch(buf: &[u8]) -> Result<Vec<Execution>, CodecError> {
    Vec::<Execution>::decode(buf).map_err(|e| CodecError::Abi { inner: e.to_string() })
}

/// Caller-facing call with optional value and calldata
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Call target
    #[serde(serialize_with = "as_checksum_addr")]
    pub to: Address,
    /// Native value; treated as zero when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Calldata; treated as empty when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

impl Call {
    /// Creates a call with explicit value and calldata
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value: Some(value), data: Some(data) }
    }
}

impl From<Call> for Execution {
    fn from(call: Call) -> Self {
        Self {
            target: call.to,
            value: call.value.unwrap_or_default(),
            call_data: call.data.unwrap_or_default(),
        }
    }
}

impl From<Execution> for Call {
    fn from(execution: Execution) -> Self {
        Self {
            to: execution.target,
            value: Some(execution.value),
            data: Some(execution.call_data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_single_layout() {
        let execution = Execution::new(
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
            0x5af3107a4000_u64.into(),
            "0xdeadbeef".parse().unwrap(),
        );
        assert_eq!(
            execution.pack_single(),
            "0x9c5754de1443984659e1b3a8d1931d83475ba29c00000000000000000000000000000000000000000000000000005af3107a4000deadbeef"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn single_roundtrip() {
        let execution = Execution::new(
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
            0x5af3107a4000_u64.into(),
            "0xdeadbeef".parse().unwrap(),
        );
        assert_eq!(Execution::unpack_single(&execution.pack_single()).unwrap(), execution);

        // no calldata: exactly 52 bytes, decodes to empty
        let bare = Execution::new(Address::random(), 7.into(), Bytes::default());
        let packed = bare.pack_single();
        assert_eq!(packed.len(), 52);
        assert_eq!(Execution::unpack_single(&packed).unwrap(), bare);
    }

    #[test]
    fn single_rejects_short_input() {
        assert_eq!(
            Execution::unpack_single(&[0u8; 51]),
            Err(CodecError::InvalidLength { got: 51, expected: 52 })
        );
    }

    #[test]
    fn pack_delegate_layout() {
        let execution = Execution::new(
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
            U256::zero(),
            "0xdeadbeef".parse().unwrap(),
        );
        assert_eq!(
            execution.pack_delegate(),
            "0x9c5754de1443984659e1b3a8d1931d83475ba29cdeadbeef".parse::<Bytes>().unwrap()
        );
    }

    #[test]
    fn delegate_roundtrip() {
        let execution = Execution::new(Address::random(), U256::zero(), "0x1234".parse().unwrap());
        assert_eq!(Execution::unpack_delegate(&execution.pack_delegate()).unwrap(), execution);

        // value is dropped by the delegate shape and reads back as zero
        let with_value = Execution::new(execution.target, 100.into(), execution.call_data.clone());
        let decoded = Execution::unpack_delegate(&with_value.pack_delegate()).unwrap();
        assert_eq!(decoded.value, U256::zero());

        assert_eq!(
            Execution::unpack_delegate(&[0u8; 19]),
            Err(CodecError::InvalidLength { got: 19, expected: 20 })
        );
    }

    #[test]
    fn pack_batch_abi_layout() {
        let executions = vec![
            Execution::new(
                "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
                0x5af3107a4000_u64.into(),
                "0xdeadbeef".parse().unwrap(),
            ),
            Execution::new(
                "0xce0FEFa6f7979C4c9b5373e0f5105b7259092c6D".parse().unwrap(),
                U256::zero(),
                Bytes::default(),
            ),
        ];
        assert_eq!(
            pack_batch(executions),
            "0x00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000004000000000000000000000000000000000000000000000000000000000000000e00000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c00000000000000000000000000000000000000000000000000005af3107a400000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000004deadbeef00000000000000000000000000000000000000000000000000000000000000000000000000000000ce0fefa6f7979c4c9b5373e0f5105b7259092c6d000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000000"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn batch_roundtrip_preserves_order() {
        let executions: Vec<Execution> = (0u8..5)
            .map(|i| {
                Execution::new(
                    Address::from_slice(&[i; 20]),
                    U256::from(i),
                    Bytes::from(vec![i; i as usize]),
                )
            })
            .collect();
        let decoded = unpack_batch(&pack_batch(executions.clone())).unwrap();
        assert_eq!(decoded, executions);
    }

    #[test]
    fn batch_rejects_garbage() {
        assert!(matches!(unpack_batch(&[0xab; 7]), Err(CodecError::Abi { .. })));
    }

    #[test]
    fn call_defaults_fill_on_conversion() {
        let call = Call { to: Address::random(), value: None, data: None };
        let execution = Execution::from(call.clone());
        assert_eq!(execution.value, U256::zero());
        assert_eq!(execution.call_data, Bytes::default());

        let back = Call::from(execution);
        assert_eq!(back.to, call.to);
        assert_eq!(back.value, Some(U256::zero()));
        assert_eq!(back.data, Some(Bytes::default()));
    }
}
