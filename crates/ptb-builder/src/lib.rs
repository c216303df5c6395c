//! Incremental programmable transaction builder.
//!
//! Assembles a transaction description from inputs and composable commands,
//! resolves symbolic/partial arguments into fully-typed call arguments by
//! consulting a chain-state service, and emits the canonical binary payload.
//! Partially-built transactions can cross process boundaries through the
//! versioned snapshot form.
//!
//! ## Example
//!
//! ```ignore
//! use sui_ptb_builder::{ChainState, TransactionBuilder};
//! use sui_ptb_transport::RpcClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut tx = TransactionBuilder::new();
//!     tx.set_sender("0xa11ce".parse()?);
//!     tx.set_gas_budget(5_000_000);
//!     tx.set_gas_payment(vec![gas_ref]);
//!
//!     let coin = tx.object("0x5");
//!     let amount = tx.pure_json(json!(100));
//!     let split = tx.move_call("0x2::pay::split", vec![], vec![coin, amount])?;
//!     tx.transfer_objects(vec![split.arg()], tx.gas());
//!
//!     let payload = tx.build(&RpcClient::mainnet()).await?.to_bytes()?;
//!     Ok(())
//! }
//! ```
//!
//! Mutation is synchronous and single-threaded; `build` is the only async
//! path and takes `&mut self`, so a build in flight excludes concurrent
//! mutation by construction.

pub mod builder;
pub mod chain;
pub mod error;
pub mod move_call;
pub mod queue;
pub mod result_ref;
pub mod snapshot;
pub mod well_known;

mod orchestrator;

pub use builder::{Input, InputValue, TransactionBuilder};
pub use chain::ChainState;
pub use error::BuildError;
pub use orchestrator::SHARED_OBJECT_MUTABLE_DEFAULT;
pub use result_ref::ResultRef;
pub use snapshot::SNAPSHOT_VERSION;
pub use well_known::ArgKind;
