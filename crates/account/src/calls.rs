//! Translation between caller-facing calls and ERC-7579 execute calldata

use crate::gen::ExecuteCall;
use ethers::{
    abi::{AbiDecode, AbiEncode},
    types::{Bytes, H256},
};
use silex_primitives::{
    pack_batch, unpack_batch, Call, CallType, CodecError, Execution, ExecutionMode,
};

/// Encodes calls as `execute(bytes32 mode, bytes executionCalldata)`
/// calldata for the account's execution entry point
///
/// One call uses the single-call shape, two or more use the batch shape.
/// An empty list is not representable.
pub fn encode_calls(calls: &[Call]) -> Result<Bytes, CodecError> {
    let (mode, execution_calldata) = match calls {
        [] => return Err(CodecError::EmptyCalls),
        [call] => (ExecutionMode::single(), Execution::from(call.clone()).pack_single()),
        _ => {
            let executions = calls.iter().cloned().map(Execution::from).collect::<Vec<_>>();
            (ExecutionMode::batch(), pack_batch(executions))
        }
    };
    let call = ExecuteCall { mode: mode.encode().0, execution_calldata };
    Ok(call.encode().into())
}

/// Decodes `execute` calldata back into the calls it carries
pub fn decode_calls(calldata: &[u8]) -> Result<Vec<Call>, CodecError> {
    let call =
        ExecuteCall::decode(calldata).map_err(|e| CodecError::Abi { inner: e.to_string() })?;
    let mode = ExecutionMode::decode(&H256(call.mode))?;
    let executions = match mode.call_type {
        CallType::Call => vec![Execution::unpack_single(&call.execution_calldata)?],
        CallType::Batch => unpack_batch(&call.execution_calldata)?,
        CallType::Delegate => vec![Execution::unpack_delegate(&call.execution_calldata)?],
    };
    Ok(executions.into_iter().map(Call::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, U256};

    #[test]
    fn single_call_encodes_with_call_type_call() {
        let calls =
            vec![Call { to: "0x0000000000000000000000000000000000000001".parse().unwrap(), value: None, data: None }];
        let calldata = encode_calls(&calls).unwrap();

        // execute(bytes32,bytes) selector
        assert_eq!(&calldata[..4], [0xe9, 0xae, 0x5c, 0x53]);
        assert_eq!(
            calldata,
            "0xe9ae5c5300000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000003400000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000000000000000000000000000000"
                .parse::<Bytes>()
                .unwrap()
        );

        let decoded = decode_calls(&calldata).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].to, calls[0].to);
        assert_eq!(decoded[0].value, Some(U256::zero()));
        assert_eq!(decoded[0].data, Some(Bytes::default()));
    }

    #[test]
    fn two_calls_encode_with_call_type_batch() {
        let calls = vec![
            Call::new(
                "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
                0x5af3107a4000_u64.into(),
                "0xdeadbeef".parse().unwrap(),
            ),
            Call { to: Address::random(), value: None, data: None },
        ];
        let calldata = encode_calls(&calls).unwrap();

        // mode word is the first argument; its first byte is the call type
        assert_eq!(calldata[4], 0x01);

        let decoded = decode_calls(&calldata).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], calls[0]);
        assert_eq!(decoded[1].to, calls[1].to);
        assert_eq!(decoded[1].value, Some(U256::zero()));
        assert_eq!(decoded[1].data, Some(Bytes::default()));
    }

    #[test]
    fn order_survives_the_roundtrip() {
        let calls: Vec<Call> = (1u8..=4)
            .map(|i| {
                Call::new(
                    Address::from_slice(&[i; 20]),
                    U256::from(i),
                    Bytes::from(vec![i; i as usize]),
                )
            })
            .collect();
        assert_eq!(decode_calls(&encode_calls(&calls).unwrap()).unwrap(), calls);
    }

    #[test]
    fn empty_calls_are_rejected() {
        assert_eq!(encode_calls(&[]), Err(CodecError::EmptyCalls));
    }

    #[test]
    fn delegate_calldata_decodes_to_a_single_call() {
        let execution = Execution::new(
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
            U256::zero(),
            "0x1234".parse().unwrap(),
        );
        let call = ExecuteCall {
            mode: ExecutionMode::delegate().encode().0,
            execution_calldata: execution.pack_delegate(),
        };
        let decoded = decode_calls(&AbiEncode::encode(call)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].to, execution.target);
        assert_eq!(decoded[0].value, Some(U256::zero()));
        assert_eq!(decoded[0].data, Some(execution.call_data));
    }

    #[test]
    fn unrecognized_call_type_is_rejected() {
        let mut mode = [0u8; 32];
        mode[0] = 0x02;
        let call = ExecuteCall { mode, execution_calldata: Bytes::default() };
        assert_eq!(
            decode_calls(&AbiEncode::encode(call)),
            Err(CodecError::UnrecognizedCallType(0x02))
        );
    }

    #[test]
    fn garbage_calldata_is_rejected() {
        assert!(matches!(decode_calls(&[0x01, 0x02, 0x03]), Err(CodecError::Abi { .. })));
    }
}
