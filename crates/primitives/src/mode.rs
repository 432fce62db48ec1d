//! ERC-7579 execution mode word
//!
//! The mode word is the 32-byte header passed to `execute(bytes32,bytes)`:
//! callType (1 byte), execType (1 byte), 4 reserved bytes, mode selector
//! (4 bytes), mode payload (22 bytes).

use crate::CodecError;
use ethers::types::H256;
use serde::{Deserialize, Serialize};

/// Call type of an ERC-7579 execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    /// Single call
    #[default]
    Call,
    /// Batch of calls
    Batch,
    /// Delegate call
    Delegate,
}

impl CallType {
    /// Byte tag of the call type
    pub fn byte(&self) -> u8 {
        match self {
            CallType::Call => 0x00,
            CallType::Batch => 0x01,
            CallType::Delegate => 0xff,
        }
    }

    /// Parses a call type from its byte tag
    pub fn try_from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            0x00 => Ok(CallType::Call),
            0x01 => Ok(CallType::Batch),
            0xff => Ok(CallType::Delegate),
            other => Err(CodecError::UnrecognizedCallType(other)),
        }
    }
}

/// Exec type of an ERC-7579 execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecType {
    /// Execution reverts on failure
    #[default]
    Default,
    /// Failures are caught and emitted as events
    Try,
}

impl ExecType {
    /// Byte tag of the exec type
    pub fn byte(&self) -> u8 {
        match self {
            ExecType::Default => 0x00,
            ExecType::Try => 0x01,
        }
    }

    /// Parses an exec type from its byte tag
    pub fn try_from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            0x00 => Ok(ExecType::Default),
            0x01 => Ok(ExecType::Try),
            other => Err(CodecError::UnrecognizedExecType(other)),
        }
    }
}

/// Decoded form of the 32-byte mode word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMode {
    /// How the execution calldata is shaped
    pub call_type: CallType,
    /// How execution failures are handled
    pub exec_type: ExecType,
    /// Mode selector (vendor-specific)
    pub selector: [u8; 4],
    /// Mode payload (vendor-specific)
    pub payload: [u8; 22],
}

impl ExecutionMode {
    /// Mode word for a single call
    pub fn single() -> Self {
        Self::default()
    }

    /// Mode word for a batch of calls
    pub fn batch() -> Self {
        Self { call_type: CallType::Batch, ..Self::default() }
    }

    /// Mode word for a delegate call
    pub fn delegate() -> Self {
        Self { call_type: CallType::Delegate, ..Self::default() }
    }

    /// Packs the mode into its 32-byte word
    pub fn encode(&self) -> H256 {
        let mut word = [0u8; 32];
        word[0] = self.call_type.byte();
        word[1] = self.exec_type.byte();
        word[6..10].copy_from_slice(&self.selector);
        word[10..32].copy_from_slice(&self.payload);
        H256(word)
    }

    /// Unpacks a mode word; the four reserved bytes are not interpreted
    pub fn decode(word: &H256) -> Result<Self, CodecError> {
        let buf = word.as_bytes();
        let call_type = CallType::try_from_byte(buf[0])?;
        let exec_type = ExecType::try_from_byte(buf[1])?;
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&buf[6..10]);
        let mut payload = [0u8; 22];
        payload.copy_from_slice(&buf[10..32]);
        Ok(Self { call_type, exec_type, selector, payload })
    }
}
