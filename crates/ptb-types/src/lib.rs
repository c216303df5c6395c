//! Shared types for the sui-ptb workspace.
//!
//! This crate provides foundational types used across multiple crates in the
//! workspace, breaking circular dependency chains.
//!
//! ## Transaction Types
//!
//! The [`transaction`] module contains the fully-resolved transaction model:
//! - [`TransactionData`](transaction::TransactionData) - Versioned payload with canonical BCS encoding
//! - [`Command`](transaction::Command) / [`Argument`](transaction::Argument) - The programmable command set
//! - [`CallArg`](transaction::CallArg) / [`ObjectArg`](transaction::ObjectArg) - Resolved call arguments
//!
//! ## Resolution Types
//!
//! The [`normalized`] module models what the chain-state service reports:
//! normalized function signatures and object metadata. The [`pure`] module
//! encodes raw JSON values into type-tagged BCS bytes.

pub mod address;
pub mod encoding;
pub mod normalized;
pub mod pure;
pub mod transaction;
pub mod type_tag;

// Re-export commonly used types at crate root
pub use address::{normalize_address, normalize_address_short, Address, ObjectId};
pub use normalized::{NormalizedFunction, NormalizedType, ObjectMetadata, Owner};
pub use pure::encode_pure;
pub use transaction::{
    Argument, CallArg, Command, GasConfig, GasData, ObjectArg, ObjectRef, ProgrammableTransaction,
    TransactionData, TransactionDataV1, TransactionExpiration, TransactionKind,
};
pub use type_tag::{parse_type_tag, StructTag, TypeTag};
