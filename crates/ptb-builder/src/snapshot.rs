//! The snapshot codec.
//!
//! Serializes builder state to a versioned JSON form so a partially-built
//! transaction can cross a process/context boundary and be completed later.
//! Gas config, sender and expiration may still be absent, but every input
//! must already hold a resolved value: raw values are not safely
//! round-trippable. Unknown versions are rejected outright, never
//! best-effort parsed.

use serde::{Deserialize, Serialize};

use sui_ptb_types::{Address, CallArg, Command, GasConfig};

use crate::builder::{Input, InputValue, TransactionBuilder};
use crate::error::BuildError;

/// The only snapshot version this build understands.
pub const SNAPSHOT_VERSION: u64 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sender: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiration: Option<u64>,
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
    gas_config: GasConfig,
}

impl TransactionBuilder {
    /// Serialize the builder to the versioned snapshot form.
    ///
    /// Fails with [`BuildError::SnapshotUnresolvedInput`] if any input still
    /// holds a raw value.
    pub fn to_snapshot(&self) -> Result<String, BuildError> {
        let inputs = self
            .inputs
            .iter()
            .map(|input| match input.value() {
                InputValue::Resolved(arg) => Ok(arg.clone()),
                _ => Err(BuildError::SnapshotUnresolvedInput(input.index())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            sender: self.sender,
            expiration: self.expiration,
            inputs,
            commands: self.commands.clone(),
            gas_config: self.gas.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Reconstruct an equivalent builder from a snapshot, preserving index
    /// order and values exactly.
    pub fn from_snapshot(serialized: &str) -> Result<Self, BuildError> {
        // Check the version tag before committing to the full shape, so a
        // future format fails as a version mismatch rather than a parse error.
        let value: serde_json::Value = serde_json::from_str(serialized)?;
        let version = value
            .get("version")
            .and_then(|v| v.as_u64())
            .ok_or(BuildError::SnapshotVersionMismatch(0))?;
        if version != SNAPSHOT_VERSION {
            return Err(BuildError::SnapshotVersionMismatch(version));
        }

        let snapshot: Snapshot = serde_json::from_value(value)?;
        let inputs = snapshot
            .inputs
            .into_iter()
            .enumerate()
            .map(|(index, arg)| Input {
                index: index as u16,
                value: InputValue::Resolved(arg),
            })
            .collect();

        Ok(TransactionBuilder {
            inputs,
            commands: snapshot.commands,
            gas: snapshot.gas_config,
            sender: snapshot.sender,
            expiration: snapshot.expiration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sui_ptb_types::{Argument, ObjectRef};

    fn resolved_builder() -> TransactionBuilder {
        let mut builder = TransactionBuilder::new();
        builder.set_sender(Address::from_hex_literal("0xa11ce").unwrap());
        builder.set_gas_budget(5_000_000);
        let coin = builder.object_ref(ObjectRef::new(
            Address::from_hex_literal("0x5").unwrap(),
            3,
            "digest",
        ));
        let amount = builder.pure(&100u64).unwrap();
        let split = builder.split_coins(coin, vec![amount]);
        builder.transfer_objects(vec![split.nested(0)], builder.gas());
        builder
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let builder = resolved_builder();
        let serialized = builder.to_snapshot().unwrap();
        let restored = TransactionBuilder::from_snapshot(&serialized).unwrap();

        assert_eq!(restored.inputs(), builder.inputs());
        assert_eq!(restored.commands(), builder.commands());
        assert_eq!(restored.sender(), builder.sender());
        assert_eq!(restored.gas_config(), builder.gas_config());
        assert_eq!(restored.expiration(), builder.expiration());
    }

    #[test]
    fn test_unresolved_input_is_rejected() {
        let mut builder = resolved_builder();
        builder.pure_json(json!(42));
        let err = builder.to_snapshot().unwrap_err();
        assert!(matches!(err, BuildError::SnapshotUnresolvedInput(2)));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let builder = resolved_builder();
        let serialized = builder.to_snapshot().unwrap();
        let bumped = serialized.replacen("\"version\": 1", "\"version\": 2", 1);
        let err = TransactionBuilder::from_snapshot(&bumped).unwrap_err();
        assert!(matches!(err, BuildError::SnapshotVersionMismatch(2)));

        let err = TransactionBuilder::from_snapshot("{}").unwrap_err();
        assert!(matches!(err, BuildError::SnapshotVersionMismatch(0)));
    }

    #[test]
    fn test_restored_arguments_stay_valid() {
        let builder = resolved_builder();
        let restored =
            TransactionBuilder::from_snapshot(&builder.to_snapshot().unwrap()).unwrap();
        // The nested result reference captured before serialization still
        // points at the same command in the restored builder.
        match &restored.commands()[1] {
            Command::TransferObjects { objects, .. } => {
                assert_eq!(objects[0], Argument::NestedResult(0, 0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
