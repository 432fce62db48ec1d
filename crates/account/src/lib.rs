//! Smart account composer and entry point interfaces
//!
//! This crate binds a network client, a signature scheme provider, and the
//! caller-supplied resolvers into one smart account object: it encodes and
//! decodes the ERC-7579 execute calldata, reads nonces from the entry point,
//! and signs ERC-4337 user operations.

mod account;
mod calls;
mod entry_point;
mod error;
mod gen;

pub use account::{
    AddressResolverFn, FactoryArgs, FactoryArgsResolverFn, SmartAccount,
};
pub use calls::{decode_calls, encode_calls};
pub use entry_point::EntryPoint;
pub use error::AccountError;
pub use gen::{EntryPointAPI, ModularAccountAPI, PackedUserOperation};
