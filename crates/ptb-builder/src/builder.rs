//! Append-only builder state.
//!
//! [`TransactionBuilder`] owns the input list, command list, gas config,
//! sender and expiration. All mutation is synchronous; the only async path is
//! the build pipeline in [`crate::orchestrator`]. Input and command lists are
//! strictly append-only: no reordering, no deletion, no index reuse.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sui_ptb_types::{
    Address, Argument, CallArg, Command, GasConfig, ObjectArg, ObjectRef, TypeTag,
};

use crate::error::BuildError;
use crate::result_ref::ResultRef;

/// The value held by a transaction input.
///
/// Unresolved values transition to `Resolved` at most once, during build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputValue {
    /// A raw scalar/array awaiting a pure encoding decision.
    UnresolvedPure(Value),

    /// A textual object identifier awaiting reference resolution.
    UnresolvedObject(String),

    /// A fully resolved call argument.
    Resolved(CallArg),
}

/// One transaction input. The index is assigned at creation, immutable, and
/// never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub(crate) index: u16,
    pub(crate) value: InputValue,
}

impl Input {
    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn value(&self) -> &InputValue {
        &self.value
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.value, InputValue::Resolved(_))
    }
}

/// Incrementally assembles a programmable transaction.
///
/// Inputs and commands are appended synchronously; [`build`] resolves all
/// remaining raw values against chain state and produces the final payload.
/// `build` takes `&mut self`, so the builder cannot be mutated or built
/// concurrently while a build is in flight.
///
/// [`build`]: TransactionBuilder::build
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    pub(crate) inputs: Vec<Input>,
    pub(crate) commands: Vec<Command>,
    pub(crate) gas: GasConfig,
    pub(crate) sender: Option<Address>,
    pub(crate) expiration: Option<u64>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Append an input at the next index and return the argument referring
    /// to it.
    pub fn add_input(&mut self, value: InputValue) -> Argument {
        let index = self.inputs.len() as u16;
        self.inputs.push(Input { index, value });
        Argument::Input(index)
    }

    /// Append an already-encoded pure input.
    pub fn pure<T: Serialize>(&mut self, value: &T) -> Result<Argument, BuildError> {
        let bytes = bcs::to_bytes(value).map_err(|e| BuildError::Encoding {
            input: self.inputs.len() as u16,
            expected: "pure bytes".to_string(),
            source: e.into(),
        })?;
        Ok(self.add_input(InputValue::Resolved(CallArg::Pure(bytes))))
    }

    /// Append a raw pure input, encoded later against the expected
    /// parameter type.
    pub fn pure_json(&mut self, value: Value) -> Argument {
        self.add_input(InputValue::UnresolvedPure(value))
    }

    /// Append an object input by textual id, resolved during build.
    pub fn object(&mut self, object_id: impl Into<String>) -> Argument {
        self.add_input(InputValue::UnresolvedObject(object_id.into()))
    }

    /// Append an owned-object input from a full reference.
    pub fn object_ref(&mut self, reference: ObjectRef) -> Argument {
        self.add_input(InputValue::Resolved(CallArg::Object(
            ObjectArg::ImmOrOwnedObject(reference),
        )))
    }

    /// Append a shared-object input.
    pub fn shared_object_ref(
        &mut self,
        object_id: Address,
        initial_shared_version: u64,
        mutable: bool,
    ) -> Argument {
        self.add_input(InputValue::Resolved(CallArg::Object(
            ObjectArg::SharedObject {
                object_id,
                initial_shared_version,
                mutable,
            },
        )))
    }

    /// Append a receiving-object input from a full reference.
    pub fn receiving_ref(&mut self, reference: ObjectRef) -> Argument {
        self.add_input(InputValue::Resolved(CallArg::Object(ObjectArg::Receiving(
            reference,
        ))))
    }

    /// The gas coin sentinel. No input is allocated for it.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Append a command and return a result reference bound to its index.
    pub fn add_command(&mut self, command: Command) -> ResultRef {
        let index = self.commands.len() as u16;
        self.commands.push(command);
        ResultRef::new(index)
    }

    /// Append a Move call. `target` is `package::module::function`.
    pub fn move_call(
        &mut self,
        target: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Result<ResultRef, BuildError> {
        let (package, module, function) = parse_target(target)?;
        Ok(self.add_command(Command::MoveCall {
            package,
            module,
            function,
            type_arguments,
            arguments,
        }))
    }

    /// Append a transfer of objects to an address.
    pub fn transfer_objects(&mut self, objects: Vec<Argument>, address: Argument) -> ResultRef {
        self.add_command(Command::TransferObjects { objects, address })
    }

    /// Append a coin split.
    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> ResultRef {
        self.add_command(Command::SplitCoins { coin, amounts })
    }

    /// Append a coin merge.
    pub fn merge_coins(&mut self, destination: Argument, sources: Vec<Argument>) -> ResultRef {
        self.add_command(Command::MergeCoins {
            destination,
            sources,
        })
    }

    /// Append a vector construction.
    pub fn make_move_vec(
        &mut self,
        type_tag: Option<TypeTag>,
        elements: Vec<Argument>,
    ) -> ResultRef {
        self.add_command(Command::MakeMoveVec { type_tag, elements })
    }

    /// Append a package publish.
    pub fn publish(&mut self, modules: Vec<Vec<u8>>, dependencies: Vec<Address>) -> ResultRef {
        self.add_command(Command::Publish {
            modules,
            dependencies,
        })
    }

    /// Append a package upgrade.
    pub fn upgrade(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<Address>,
        package: Address,
        ticket: Argument,
    ) -> ResultRef {
        self.add_command(Command::Upgrade {
            modules,
            dependencies,
            package,
            ticket,
        })
    }

    // =========================================================================
    // Gas / sender / expiration
    // =========================================================================

    pub fn set_sender(&mut self, sender: Address) {
        self.sender = Some(sender);
    }

    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas.budget = Some(budget);
    }

    pub fn set_gas_price(&mut self, price: u64) {
        self.gas.price = Some(price);
    }

    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) {
        self.gas.payment = Some(payment);
    }

    pub fn set_gas_owner(&mut self, owner: Address) {
        self.gas.owner = Some(owner);
    }

    /// Set or clear the epoch expiration bound. Absent = no expiration.
    pub fn set_expiration(&mut self, epoch: Option<u64>) {
        self.expiration = epoch;
    }

    // =========================================================================
    // Views
    // =========================================================================
    // External holders only ever see copies or immutable views, so the
    // append-only invariants cannot be violated from outside.

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    pub fn gas_config(&self) -> &GasConfig {
        &self.gas
    }

    pub fn expiration(&self) -> Option<u64> {
        self.expiration
    }
}

/// Split a `package::module::function` target into its parts.
pub(crate) fn parse_target(target: &str) -> Result<(Address, String, String), BuildError> {
    let parts: Vec<&str> = target.split("::").collect();
    let [package, module, function] = parts.as_slice() else {
        return Err(BuildError::InvalidTarget(target.to_string()));
    };
    if module.is_empty() || function.is_empty() {
        return Err(BuildError::InvalidTarget(target.to_string()));
    }
    let package = Address::from_hex_literal(package)
        .map_err(|_| BuildError::InvalidTarget(target.to_string()))?;
    Ok((package, module.to_string(), function.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inputs_are_append_only() {
        let mut builder = TransactionBuilder::new();
        let args: Vec<Argument> = (0..10)
            .map(|i| builder.pure_json(json!(i)))
            .collect();
        for (i, arg) in args.iter().enumerate() {
            assert_eq!(*arg, Argument::Input(i as u16));
            assert_eq!(builder.inputs()[i].index(), i as u16);
        }
    }

    #[test]
    fn test_commands_are_append_only() {
        let mut builder = TransactionBuilder::new();
        let coin = builder.object("0x5");
        let first = builder.split_coins(coin, vec![]);
        let second = builder.transfer_objects(vec![first.arg()], builder.gas());
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(builder.commands().len(), 2);
    }

    #[test]
    fn test_pure_encodes_immediately() {
        let mut builder = TransactionBuilder::new();
        builder.pure(&100u64).unwrap();
        match builder.inputs()[0].value() {
            InputValue::Resolved(CallArg::Pure(bytes)) => {
                assert_eq!(bytes, &100u64.to_le_bytes().to_vec());
            }
            other => panic!("expected resolved pure input, got {:?}", other),
        }
    }

    #[test]
    fn test_gas_allocates_no_input() {
        let mut builder = TransactionBuilder::new();
        assert_eq!(builder.gas(), Argument::GasCoin);
        let _ = builder.gas();
        assert!(builder.inputs().is_empty());
        builder.pure(&1u8).unwrap();
        assert_eq!(builder.gas(), Argument::GasCoin);
        assert_eq!(builder.inputs().len(), 1);
    }

    #[test]
    fn test_parse_target() {
        let (package, module, function) = parse_target("0x2::pay::split").unwrap();
        assert_eq!(package, Address::SUI_FRAMEWORK);
        assert_eq!(module, "pay");
        assert_eq!(function, "split");

        assert!(matches!(
            parse_target("0x2::pay"),
            Err(BuildError::InvalidTarget(_))
        ));
        assert!(matches!(
            parse_target("zzz::pay::split"),
            Err(BuildError::InvalidTarget(_))
        ));
    }
}
