//! Transaction wire types for the sui-ptb workspace.
//!
//! This module contains the fully-resolved transaction model: arguments,
//! commands, call arguments, gas data and the versioned [`TransactionData`]
//! envelope. The canonical binary payload is the BCS encoding of
//! [`TransactionData`]; variant order therefore matters and is fixed below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::address::{Address, ObjectId};
use crate::encoding::{base64_bytes, base64_module_bytes};
use crate::type_tag::TypeTag;

/// An argument to a programmable transaction command.
///
/// Immutable once constructed. BCS variant order is fixed: GasCoin = 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The gas coin sentinel. No input is allocated for it.
    GasCoin,

    /// Reference to a transaction input (by index).
    Input(u16),

    /// Reference to the result of a previous command (by command index).
    /// For commands with a single return value.
    Result(u16),

    /// Reference to a specific value in a multi-return command result.
    /// (command_index, value_index)
    NestedResult(u16, u16),
}

/// A reference to an owned (or immutable) object at a specific version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    /// Object digest, base58 encoded as returned by the network.
    pub digest: String,
}

impl ObjectRef {
    pub fn new(object_id: ObjectId, version: u64, digest: impl Into<String>) -> Self {
        Self {
            object_id,
            version,
            digest: digest.into(),
        }
    }
}

/// A fully resolved object argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    /// An owned or immutable object reference.
    ImmOrOwnedObject(ObjectRef),

    /// A shared object reference. Requires the initial shared version for
    /// deterministic ordering.
    SharedObject {
        object_id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },

    /// An object previously transferred to the sender, received during
    /// execution. Never produced by resolution; constructed explicitly.
    Receiving(ObjectRef),
}

impl ObjectArg {
    /// The object ID this argument refers to.
    pub fn object_id(&self) -> ObjectId {
        match self {
            ObjectArg::ImmOrOwnedObject(r) | ObjectArg::Receiving(r) => r.object_id,
            ObjectArg::SharedObject { object_id, .. } => *object_id,
        }
    }
}

/// A fully resolved, binary-encodable call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// Type-tagged pure value bytes (BCS).
    Pure(#[serde(with = "base64_bytes")] Vec<u8>),

    /// An object reference.
    Object(ObjectArg),
}

/// A command in a programmable transaction.
///
/// Closed variant set; position in the command list is permanent identity.
/// BCS variant order is fixed as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Call a Move function.
    MoveCall {
        package: Address,
        module: String,
        function: String,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    },

    /// Transfer objects to an address.
    TransferObjects {
        objects: Vec<Argument>,
        address: Argument,
    },

    /// Split a coin into multiple coins with specified amounts.
    /// Returns a vector of the split coins.
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },

    /// Merge source coins into a destination coin.
    /// The source coins are destroyed.
    MergeCoins {
        destination: Argument,
        sources: Vec<Argument>,
    },

    /// Publish new modules.
    Publish {
        #[serde(with = "base64_module_bytes")]
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    },

    /// Create a vector from elements.
    /// If type_tag is None, it's inferred from elements.
    MakeMoveVec {
        type_tag: Option<TypeTag>,
        elements: Vec<Argument>,
    },

    /// Upgrade an existing package.
    Upgrade {
        #[serde(with = "base64_module_bytes")]
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
        package: ObjectId,
        ticket: Argument,
    },
}

impl Command {
    /// All arguments carried by this command, in declaration order.
    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Command::MoveCall { arguments, .. } => arguments.clone(),
            Command::TransferObjects { objects, address } => {
                let mut args = objects.clone();
                args.push(*address);
                args
            }
            Command::SplitCoins { coin, amounts } => {
                let mut args = vec![*coin];
                args.extend(amounts.iter().copied());
                args
            }
            Command::MergeCoins {
                destination,
                sources,
            } => {
                let mut args = vec![*destination];
                args.extend(sources.iter().copied());
                args
            }
            Command::MakeMoveVec { elements, .. } => elements.clone(),
            Command::Publish { .. } => Vec::new(),
            Command::Upgrade { ticket, .. } => vec![*ticket],
        }
    }
}

/// Gas configuration, filled progressively while building.
///
/// All fields optional until build time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Vec<ObjectRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
}

/// Fully resolved gas data carried by a built transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: Address,
    pub price: u64,
    pub budget: u64,
}

/// Optional epoch bound on transaction validity. Absent = no expiration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    #[default]
    None,
    Epoch(u64),
}

/// The programmable transaction body: resolved inputs plus ordered commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

/// Transaction kind. Only programmable transactions are representable here,
/// but the enum keeps the kind discriminant in the binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

/// Versioned transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

/// Version 1 of the transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: Address,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

impl TransactionData {
    /// Assemble a v1 programmable transaction payload.
    pub fn new_programmable(
        sender: Address,
        gas_data: GasData,
        expiration: TransactionExpiration,
        inputs: Vec<CallArg>,
        commands: Vec<Command>,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
                inputs,
                commands,
            }),
            sender,
            gas_data,
            expiration,
        })
    }

    /// Canonical binary encoding of the payload, ready for submission.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bcs::to_bytes(self).context("Failed to BCS-encode transaction data")
    }
}
