//! Smart account (ERC-4337, ERC-7579) primitive types
//!
//! This crate contains the execution types and codec for the ERC-7579
//! execute interface, the packed (entry point v0.7) user operation, and
//! helper functions shared across the workspace.

pub mod constants;
mod error;
mod execution;
mod mode;
mod user_operation;
mod utils;

pub use error::CodecError;
pub use execution::{pack_batch, unpack_batch, Call, Execution};
pub use mode::{CallType, ExecType, ExecutionMode};
pub use user_operation::{UserOperation, UserOperationHash, UserOperationRequest};
pub use utils::{
    get_address, pack_factory_data, pack_paymaster_data, pack_uint128, unpack_factory_data,
    unpack_paymaster_data, unpack_uint128,
};
