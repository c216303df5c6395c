//! Move-call signature resolution.
//!
//! Move calls carry arbitrary user-defined signatures, so resolving their raw
//! inputs requires the callee's normalized parameter list from the
//! chain-state service. Signature fetches for distinct calls run
//! concurrently; the write-backs are applied sequentially afterwards.

use sui_ptb_types::{encode_pure, Address, Argument, CallArg, Command, NormalizedFunction};

use crate::builder::{Input, InputValue};
use crate::error::BuildError;
use crate::queue::ObjectQueue;

/// The target of a Move call that still needs its signature fetched:
/// it has at least one `Input` argument on an unresolved input.
pub fn pending_target(inputs: &[Input], command: &Command) -> Option<(Address, String, String)> {
    let Command::MoveCall {
        package,
        module,
        function,
        arguments,
        ..
    } = command
    else {
        return None;
    };

    let needs_resolution = arguments.iter().any(|arg| match arg {
        Argument::Input(i) => inputs
            .get(*i as usize)
            .map_or(false, |input| !input.is_resolved()),
        _ => false,
    });
    needs_resolution.then(|| (*package, module.clone(), function.clone()))
}

/// Resolve one Move call's raw inputs against its fetched signature.
///
/// The trailing implicit execution-context parameter is dropped; the
/// remaining count must match the supplied argument count exactly. Pure
/// parameters are encoded and written back immediately; object parameters
/// are enqueued for the batched lookup.
pub fn apply_signature(
    inputs: &mut [Input],
    command: &Command,
    signature: &NormalizedFunction,
    queue: &mut ObjectQueue,
) -> Result<(), BuildError> {
    let Command::MoveCall {
        package,
        module,
        function,
        arguments,
        ..
    } = command
    else {
        return Ok(());
    };
    let target = format!("{}::{}::{}", package.to_hex_literal(), module, function);

    let parameters = signature.caller_parameters();
    if parameters.len() != arguments.len() {
        return Err(BuildError::ArgumentCountMismatch {
            target,
            expected: parameters.len(),
            actual: arguments.len(),
        });
    }

    for (position, (parameter, argument)) in parameters.iter().zip(arguments).enumerate() {
        let Argument::Input(index) = argument else {
            continue;
        };
        let Some(input) = inputs.get_mut(*index as usize) else {
            continue;
        };
        if input.is_resolved() {
            continue;
        }

        if let Some(tag) = parameter.pure_tag() {
            let raw = match input.value() {
                InputValue::UnresolvedPure(v) => v.clone(),
                // A textual id against a pure parameter is still a raw
                // string value (e.g. an address parameter).
                InputValue::UnresolvedObject(id) => serde_json::Value::String(id.clone()),
                InputValue::Resolved(_) => unreachable!(),
            };
            let bytes = encode_pure(&raw, &tag).map_err(|e| BuildError::Encoding {
                input: *index,
                expected: tag.to_string(),
                source: e,
            })?;
            input.value = InputValue::Resolved(CallArg::Pure(bytes));
        } else if parameter.expects_object() {
            queue.push_textual(input, *index)?;
        } else {
            return Err(BuildError::UnknownArgumentType {
                target,
                index: position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sui_ptb_types::NormalizedType;

    fn coin_param() -> NormalizedType {
        NormalizedType::Struct {
            address: Address::SUI_FRAMEWORK,
            module: "coin".to_string(),
            name: "Coin".to_string(),
            type_arguments: vec![],
        }
    }

    fn ctx_param() -> NormalizedType {
        NormalizedType::MutableReference(Box::new(NormalizedType::Struct {
            address: Address::SUI_FRAMEWORK,
            module: "tx_context".to_string(),
            name: "TxContext".to_string(),
            type_arguments: vec![],
        }))
    }

    fn split_call(arguments: Vec<Argument>) -> Command {
        Command::MoveCall {
            package: Address::SUI_FRAMEWORK,
            module: "pay".to_string(),
            function: "split".to_string(),
            type_arguments: vec![],
            arguments,
        }
    }

    fn raw_inputs() -> Vec<Input> {
        vec![
            Input {
                index: 0,
                value: InputValue::UnresolvedObject("0x5".to_string()),
            },
            Input {
                index: 1,
                value: InputValue::UnresolvedPure(json!(100)),
            },
        ]
    }

    #[test]
    fn test_pending_target_requires_unresolved_input() {
        let inputs = raw_inputs();
        let command = split_call(vec![Argument::Input(0), Argument::Input(1)]);
        assert!(pending_target(&inputs, &command).is_some());

        // Only non-Input arguments: nothing to fetch.
        let command = split_call(vec![Argument::GasCoin, Argument::Result(0)]);
        assert!(pending_target(&inputs, &command).is_none());
    }

    #[test]
    fn test_apply_signature_resolves_and_queues() {
        let mut inputs = raw_inputs();
        let command = split_call(vec![Argument::Input(0), Argument::Input(1)]);
        let signature = NormalizedFunction {
            parameters: vec![coin_param(), NormalizedType::U64, ctx_param()],
        };
        let mut queue = ObjectQueue::default();
        apply_signature(&mut inputs, &command, &signature, &mut queue).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.entries()[0].input, 0);
        match inputs[1].value() {
            InputValue::Resolved(CallArg::Pure(bytes)) => {
                assert_eq!(bytes, &100u64.to_le_bytes().to_vec());
            }
            other => panic!("amount not encoded: {:?}", other),
        }
    }

    #[test]
    fn test_argument_count_mismatch() {
        let mut inputs = raw_inputs();
        let command = split_call(vec![
            Argument::Input(0),
            Argument::Input(1),
            Argument::GasCoin,
        ]);
        let signature = NormalizedFunction {
            parameters: vec![coin_param(), NormalizedType::U64, ctx_param()],
        };
        let mut queue = ObjectQueue::default();
        let err = apply_signature(&mut inputs, &command, &signature, &mut queue).unwrap_err();
        assert!(matches!(
            err,
            BuildError::ArgumentCountMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_object_parameter_rejects_non_textual_value() {
        let mut inputs = vec![Input {
            index: 0,
            value: InputValue::UnresolvedPure(json!(42)),
        }];
        let command = split_call(vec![Argument::Input(0)]);
        let signature = NormalizedFunction {
            parameters: vec![coin_param()],
        };
        let mut queue = ObjectQueue::default();
        let err = apply_signature(&mut inputs, &command, &signature, &mut queue).unwrap_err();
        assert!(matches!(err, BuildError::ExpectedObjectId { input: 0, .. }));
    }

    #[test]
    fn test_unknown_parameter_shape() {
        let mut inputs = vec![Input {
            index: 0,
            value: InputValue::UnresolvedPure(json!(42)),
        }];
        let command = split_call(vec![Argument::Input(0)]);
        // A reference to a primitive is neither pure nor an object.
        let signature = NormalizedFunction {
            parameters: vec![NormalizedType::Reference(Box::new(NormalizedType::U64))],
        };
        let mut queue = ObjectQueue::default();
        let err = apply_signature(&mut inputs, &command, &signature, &mut queue).unwrap_err();
        assert!(matches!(
            err,
            BuildError::UnknownArgumentType { index: 0, .. }
        ));
    }
}
