//! Well-known argument-kind resolution.
//!
//! Non-Move commands have statically known argument shapes, so their raw
//! inputs resolve without fetching anything: pure values are encoded in
//! place, object ids are queued for the batched lookup. Dispatch is a pattern
//! match over the closed command set; there is no field reflection.

use sui_ptb_types::type_tag::StructTag;
use sui_ptb_types::{encode_pure, Address, Argument, CallArg, Command, TypeTag};

use crate::builder::{Input, InputValue};
use crate::error::BuildError;
use crate::queue::ObjectQueue;

/// The expected kind of one command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgKind {
    /// A pure value of the given type.
    Pure(TypeTag),
    /// An object reference.
    Object,
}

/// The statically known `(argument, kind)` pairs of a command.
///
/// Move calls return an empty table: their shapes come from the fetched
/// signature. Fields with no statically known kind (e.g. `MakeMoveVec`
/// without a declared element type) are omitted and left untouched.
pub fn known_argument_kinds(command: &Command) -> Vec<(Argument, ArgKind)> {
    match command {
        Command::MoveCall { .. } | Command::Publish { .. } => Vec::new(),

        Command::TransferObjects { objects, address } => objects
            .iter()
            .map(|a| (*a, ArgKind::Object))
            .chain(std::iter::once((*address, ArgKind::Pure(TypeTag::Address))))
            .collect(),

        Command::SplitCoins { coin, amounts } => std::iter::once((*coin, ArgKind::Object))
            .chain(amounts.iter().map(|a| (*a, ArgKind::Pure(TypeTag::U64))))
            .collect(),

        Command::MergeCoins {
            destination,
            sources,
        } => std::iter::once((*destination, ArgKind::Object))
            .chain(sources.iter().map(|a| (*a, ArgKind::Object)))
            .collect(),

        Command::MakeMoveVec { type_tag, elements } => match type_tag {
            Some(tag) if is_pure_tag(tag) => elements
                .iter()
                .map(|a| (*a, ArgKind::Pure(tag.clone())))
                .collect(),
            Some(_) => elements.iter().map(|a| (*a, ArgKind::Object)).collect(),
            None => Vec::new(),
        },

        Command::Upgrade { ticket, .. } => vec![(*ticket, ArgKind::Object)],
    }
}

/// Whether values of this type embed as type-tagged pure bytes.
pub fn is_pure_tag(tag: &TypeTag) -> bool {
    match tag {
        TypeTag::Bool
        | TypeTag::U8
        | TypeTag::U16
        | TypeTag::U32
        | TypeTag::U64
        | TypeTag::U128
        | TypeTag::U256
        | TypeTag::Address => true,
        TypeTag::Signer => false,
        TypeTag::Vector(inner) => is_pure_tag(inner),
        TypeTag::Struct(s) => is_pure_struct(s),
    }
}

fn is_pure_struct(tag: &StructTag) -> bool {
    if tag.is(Address::MOVE_STDLIB, "string", "String")
        || tag.is(Address::MOVE_STDLIB, "ascii", "String")
        || tag.is(Address::SUI_FRAMEWORK, "object", "ID")
    {
        return true;
    }
    if tag.is(Address::MOVE_STDLIB, "option", "Option") {
        return tag.type_params.first().map(is_pure_tag).unwrap_or(false);
    }
    false
}

/// Resolve one command's statically known fields against the input list.
///
/// Pure values are encoded and written back immediately; object ids are
/// appended to `queue` for the batched lookup. Arguments that are not
/// `Input`, or inputs already resolved, are skipped.
pub fn apply(
    inputs: &mut [Input],
    command: &Command,
    queue: &mut ObjectQueue,
) -> Result<(), BuildError> {
    for (argument, kind) in known_argument_kinds(command) {
        let Argument::Input(index) = argument else {
            continue;
        };
        // An out-of-range index is left for the network to reject, like an
        // over-read nested result.
        let Some(input) = inputs.get_mut(index as usize) else {
            continue;
        };
        if input.is_resolved() {
            continue;
        }

        match kind {
            ArgKind::Pure(tag) => {
                let raw = match input.value() {
                    InputValue::UnresolvedPure(v) => v.clone(),
                    // A declared-pure field holding an object id is a raw
                    // shape mismatch.
                    InputValue::UnresolvedObject(id) => {
                        return Err(BuildError::Encoding {
                            input: index,
                            expected: tag.to_string(),
                            source: anyhow::anyhow!("input holds object id '{}'", id),
                        });
                    }
                    InputValue::Resolved(_) => unreachable!(),
                };
                let bytes = encode_pure(&raw, &tag).map_err(|e| BuildError::Encoding {
                    input: index,
                    expected: tag.to_string(),
                    source: e,
                })?;
                input.value = InputValue::Resolved(CallArg::Pure(bytes));
            }
            ArgKind::Object => queue.push_textual(input, index)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sui_ptb_types::parse_type_tag;

    fn unresolved_pure(index: u16, value: Value) -> Input {
        Input {
            index,
            value: InputValue::UnresolvedPure(value),
        }
    }

    fn unresolved_object(index: u16, id: &str) -> Input {
        Input {
            index,
            value: InputValue::UnresolvedObject(id.to_string()),
        }
    }

    #[test]
    fn test_split_coins_encodes_amounts_and_queues_coin() {
        let mut inputs = vec![
            unresolved_object(0, "0x5"),
            unresolved_pure(1, json!(100)),
        ];
        let command = Command::SplitCoins {
            coin: Argument::Input(0),
            amounts: vec![Argument::Input(1)],
        };
        let mut queue = ObjectQueue::default();
        apply(&mut inputs, &command, &mut queue).unwrap();

        assert_eq!(queue.len(), 1);
        match inputs[1].value() {
            InputValue::Resolved(CallArg::Pure(bytes)) => {
                assert_eq!(bytes, &100u64.to_le_bytes().to_vec());
            }
            other => panic!("amount not encoded: {:?}", other),
        }
    }

    #[test]
    fn test_non_input_arguments_are_skipped() {
        let mut inputs = vec![unresolved_pure(0, json!("0xa11ce"))];
        let command = Command::TransferObjects {
            objects: vec![Argument::Result(0), Argument::GasCoin],
            address: Argument::Input(0),
        };
        let mut queue = ObjectQueue::default();
        apply(&mut inputs, &command, &mut queue).unwrap();

        assert!(queue.is_empty());
        assert!(inputs[0].is_resolved());
    }

    #[test]
    fn test_pure_field_rejects_object_input() {
        let mut inputs = vec![unresolved_object(0, "0x5")];
        let command = Command::SplitCoins {
            coin: Argument::GasCoin,
            amounts: vec![Argument::Input(0)],
        };
        let mut queue = ObjectQueue::default();
        let err = apply(&mut inputs, &command, &mut queue).unwrap_err();
        assert!(matches!(err, BuildError::Encoding { input: 0, .. }));
    }

    #[test]
    fn test_make_move_vec_kind_table() {
        let elements = vec![Argument::Input(0)];

        let pure = Command::MakeMoveVec {
            type_tag: Some(TypeTag::U64),
            elements: elements.clone(),
        };
        assert_eq!(
            known_argument_kinds(&pure),
            vec![(Argument::Input(0), ArgKind::Pure(TypeTag::U64))]
        );

        let object = Command::MakeMoveVec {
            type_tag: parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>"),
            elements: elements.clone(),
        };
        assert_eq!(
            known_argument_kinds(&object),
            vec![(Argument::Input(0), ArgKind::Object)]
        );

        // No declared type: nothing statically known, elements untouched.
        let unknown = Command::MakeMoveVec {
            type_tag: None,
            elements,
        };
        assert!(known_argument_kinds(&unknown).is_empty());
    }

    #[test]
    fn test_is_pure_tag_well_known_structs() {
        assert!(is_pure_tag(&parse_type_tag("0x1::string::String").unwrap()));
        assert!(is_pure_tag(
            &parse_type_tag("0x1::option::Option<u64>").unwrap()
        ));
        assert!(!is_pure_tag(
            &parse_type_tag("0x1::option::Option<0x2::coin::Coin<0x2::sui::SUI>>").unwrap()
        ));
        assert!(!is_pure_tag(&parse_type_tag("0x2::sui::SUI").unwrap()));
    }
}
