//! The build pipeline.
//!
//! A single pass over the builder state: validate, fill the gas price, run
//! both resolution passes, perform one batched object lookup, check
//! completeness, assemble. The pipeline runs as one logical async task;
//! signature fetches inside it are concurrent, and the object batch strictly
//! follows all queueing. Taking `&mut self` gives the build exclusive
//! ownership of the state for its duration.

use anyhow::anyhow;
use futures::future;
use tracing::debug;

use sui_ptb_types::{
    Address, CallArg, GasData, ObjectArg, ObjectRef, Owner, TransactionData,
    TransactionExpiration,
};

use crate::builder::{InputValue, TransactionBuilder};
use crate::chain::ChainState;
use crate::error::BuildError;
use crate::move_call;
use crate::queue::ObjectQueue;
use crate::well_known;

/// Shared objects are currently always requested as mutable.
// TODO: derive the flag from actual usage intent once the product call on
// read-only shared access is made.
pub const SHARED_OBJECT_MUTABLE_DEFAULT: bool = true;

impl TransactionBuilder {
    /// Resolve every remaining raw input against chain state and assemble
    /// the final transaction payload.
    ///
    /// Fails fast on missing sender/budget/payment before any network call.
    /// Any chain-state failure aborts the whole pipeline; nothing is retried
    /// here. Building an already-resolved builder issues no further
    /// resolution calls and yields a byte-identical payload.
    pub async fn build(&mut self, chain: &dyn ChainState) -> Result<TransactionData, BuildError> {
        // Stage 1: validate. No network call happens before this passes.
        let sender = self
            .sender
            .ok_or(BuildError::MissingRequiredField("sender"))?;
        let budget = self
            .gas
            .budget
            .ok_or(BuildError::MissingRequiredField("gas budget"))?;
        let payment = self
            .gas
            .payment
            .clone()
            .ok_or(BuildError::MissingRequiredField("gas payment"))?;

        // Stage 2: fill the gas price if unset.
        let price = match self.gas.price {
            Some(price) => price,
            None => {
                let price = chain
                    .reference_gas_price()
                    .await
                    .map_err(BuildError::Rpc)?;
                self.gas.price = Some(price);
                price
            }
        };

        // Stage 3: well-known scan over all non-Move commands.
        let mut queue = ObjectQueue::default();
        for command in &self.commands {
            well_known::apply(&mut self.inputs, command, &mut queue)?;
        }

        // Stage 4: fetch all needed Move-call signatures concurrently, then
        // apply them in command order. Each input is written at most once, so
        // the concurrent fetches never race on builder state.
        let pending: Vec<(usize, Address, String, String)> = self
            .commands
            .iter()
            .enumerate()
            .filter_map(|(i, command)| {
                move_call::pending_target(&self.inputs, command)
                    .map(|(package, module, function)| (i, package, module, function))
            })
            .collect();
        if !pending.is_empty() {
            debug!(calls = pending.len(), "fetching move call signatures");
        }
        let signatures = future::try_join_all(pending.iter().map(|(_, package, module, function)| {
            chain.normalized_function(*package, module, function)
        }))
        .await
        .map_err(BuildError::Rpc)?;
        for ((index, ..), signature) in pending.iter().zip(&signatures) {
            move_call::apply_signature(
                &mut self.inputs,
                &self.commands[*index],
                signature,
                &mut queue,
            )?;
        }

        // Stage 5: one batched object lookup, written back positionally.
        if !queue.is_empty() {
            let ids = queue.ids();
            debug!(objects = ids.len(), "resolving object references");
            let metadata = chain
                .object_batch(&ids)
                .await
                .map_err(BuildError::ObjectLookup)?;
            if metadata.len() != ids.len() {
                return Err(BuildError::ObjectLookup(anyhow!(
                    "expected {} results, got {}",
                    ids.len(),
                    metadata.len()
                )));
            }
            for (entry, meta) in queue.entries().iter().zip(metadata) {
                let call_arg = match meta.owner {
                    Owner::Shared {
                        initial_shared_version,
                    } => CallArg::Object(ObjectArg::SharedObject {
                        object_id: meta.object_id,
                        initial_shared_version,
                        mutable: SHARED_OBJECT_MUTABLE_DEFAULT,
                    }),
                    _ => CallArg::Object(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
                        meta.object_id,
                        meta.version,
                        meta.digest,
                    ))),
                };
                self.inputs[entry.input as usize].value = InputValue::Resolved(call_arg);
            }
        }

        // Stage 6: every input must now hold a resolved value.
        for input in &self.inputs {
            if !input.is_resolved() {
                return Err(BuildError::DanglingInput(input.index()));
            }
        }

        // Stage 7: assemble.
        let gas_data = GasData {
            payment,
            owner: self.gas.owner.unwrap_or(sender),
            price,
            budget,
        };
        let expiration = match self.expiration {
            Some(epoch) => TransactionExpiration::Epoch(epoch),
            None => TransactionExpiration::None,
        };
        let inputs: Vec<CallArg> = self
            .inputs
            .iter()
            .map(|input| match input.value() {
                InputValue::Resolved(arg) => arg.clone(),
                _ => unreachable!("checked above"),
            })
            .collect();
        Ok(TransactionData::new_programmable(
            sender,
            gas_data,
            expiration,
            inputs,
            self.commands.clone(),
        ))
    }
}
