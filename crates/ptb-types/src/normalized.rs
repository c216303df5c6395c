//! Normalized Move function signatures and object metadata.
//!
//! These are the shapes returned by the chain-state service
//! (`sui_getNormalizedMoveFunction` and `sui_multiGetObjects`) in the form
//! argument resolution consumes them. Parsing is done against the JSON-RPC
//! response layout.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::{Address, ObjectId};
use crate::type_tag::{StructTag, TypeTag};

/// A normalized Move type as reported by the chain-state service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizedType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Struct {
        address: Address,
        module: String,
        name: String,
        type_arguments: Vec<NormalizedType>,
    },
    Vector(Box<NormalizedType>),
    TypeParameter(u16),
    Reference(Box<NormalizedType>),
    MutableReference(Box<NormalizedType>),
}

impl NormalizedType {
    /// Parse from the JSON-RPC representation: primitives are bare strings
    /// ("U64", "Address"), compound types are single-key objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        if let Some(s) = value.as_str() {
            return match s {
                "Bool" => Ok(NormalizedType::Bool),
                "U8" => Ok(NormalizedType::U8),
                "U16" => Ok(NormalizedType::U16),
                "U32" => Ok(NormalizedType::U32),
                "U64" => Ok(NormalizedType::U64),
                "U128" => Ok(NormalizedType::U128),
                "U256" => Ok(NormalizedType::U256),
                "Address" => Ok(NormalizedType::Address),
                "Signer" => Ok(NormalizedType::Signer),
                other => Err(anyhow!("Unknown normalized type '{}'", other)),
            };
        }

        let obj = value
            .as_object()
            .ok_or_else(|| anyhow!("Normalized type is neither string nor object: {}", value))?;

        if let Some(inner) = obj.get("Vector") {
            return Ok(NormalizedType::Vector(Box::new(Self::from_json(inner)?)));
        }
        if let Some(inner) = obj.get("Reference") {
            return Ok(NormalizedType::Reference(Box::new(Self::from_json(inner)?)));
        }
        if let Some(inner) = obj.get("MutableReference") {
            return Ok(NormalizedType::MutableReference(Box::new(Self::from_json(
                inner,
            )?)));
        }
        if let Some(idx) = obj.get("TypeParameter") {
            let idx = idx
                .as_u64()
                .ok_or_else(|| anyhow!("TypeParameter index is not a number"))?;
            return Ok(NormalizedType::TypeParameter(idx as u16));
        }
        if let Some(s) = obj.get("Struct") {
            let address = s
                .get("address")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("Struct type missing address"))?;
            let module = s
                .get("module")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("Struct type missing module"))?;
            let name = s
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("Struct type missing name"))?;
            let type_arguments = s
                .get("typeArguments")
                .and_then(|v| v.as_array())
                .map(|args| args.iter().map(Self::from_json).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            return Ok(NormalizedType::Struct {
                address: Address::from_hex_literal(address)?,
                module: module.to_string(),
                name: name.to_string(),
                type_arguments,
            });
        }

        Err(anyhow!("Unrecognized normalized type: {}", value))
    }

    /// Strip one level of reference, if any.
    pub fn strip_reference(&self) -> &NormalizedType {
        match self {
            NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner) => inner,
            other => other,
        }
    }

    /// Whether this parameter is the implicit execution context
    /// (`&TxContext`, `&mut TxContext`, or by value). Callers never supply it.
    pub fn is_tx_context(&self) -> bool {
        match self.strip_reference() {
            NormalizedType::Struct {
                address,
                module,
                name,
                ..
            } => *address == Address::SUI_FRAMEWORK && module == "tx_context" && name == "TxContext",
            _ => false,
        }
    }

    /// The pure-encoding type tag for this parameter, if it is a pure
    /// scalar/vector (including the well-known pure struct wrappers:
    /// `0x1::string::String`, `0x1::ascii::String`, `0x2::object::ID` and
    /// `0x1::option::Option<T>` for pure `T`).
    ///
    /// Returns None for object types, type parameters and references.
    pub fn pure_tag(&self) -> Option<TypeTag> {
        match self {
            NormalizedType::Bool => Some(TypeTag::Bool),
            NormalizedType::U8 => Some(TypeTag::U8),
            NormalizedType::U16 => Some(TypeTag::U16),
            NormalizedType::U32 => Some(TypeTag::U32),
            NormalizedType::U64 => Some(TypeTag::U64),
            NormalizedType::U128 => Some(TypeTag::U128),
            NormalizedType::U256 => Some(TypeTag::U256),
            NormalizedType::Address => Some(TypeTag::Address),
            NormalizedType::Vector(inner) => inner.pure_tag().map(|t| TypeTag::Vector(Box::new(t))),
            NormalizedType::Struct {
                address,
                module,
                name,
                type_arguments,
            } => {
                let is_string = *address == Address::MOVE_STDLIB
                    && ((module == "string" && name == "String")
                        || (module == "ascii" && name == "String"));
                let is_id =
                    *address == Address::SUI_FRAMEWORK && module == "object" && name == "ID";
                let is_option =
                    *address == Address::MOVE_STDLIB && module == "option" && name == "Option";

                if is_string || is_id {
                    Some(TypeTag::Struct(Box::new(StructTag {
                        address: *address,
                        module: module.clone(),
                        name: name.clone(),
                        type_params: vec![],
                    })))
                } else if is_option {
                    let inner = type_arguments.first()?.pure_tag()?;
                    Some(TypeTag::Struct(Box::new(StructTag {
                        address: *address,
                        module: module.clone(),
                        name: name.clone(),
                        type_params: vec![inner],
                    })))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Whether this parameter expects an object argument: a struct that is
    /// not pure-encodable, or a generic type parameter (possibly behind a
    /// reference).
    pub fn expects_object(&self) -> bool {
        match self.strip_reference() {
            t @ NormalizedType::Struct { .. } => t.pure_tag().is_none(),
            NormalizedType::TypeParameter(_) => true,
            _ => false,
        }
    }
}

/// A normalized Move function signature: the ordered parameter-type list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFunction {
    pub parameters: Vec<NormalizedType>,
}

impl NormalizedFunction {
    /// Parse from the `sui_getNormalizedMoveFunction` response body.
    pub fn from_json(value: &Value) -> Result<Self> {
        let parameters = value
            .get("parameters")
            .and_then(|v| v.as_array())
            .ok_or_else(|| anyhow!("Normalized function response missing 'parameters'"))?
            .iter()
            .map(NormalizedType::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { parameters })
    }

    /// Parameters callers actually supply: the declared list minus a trailing
    /// implicit execution context, if present.
    pub fn caller_parameters(&self) -> &[NormalizedType] {
        match self.parameters.last() {
            Some(last) if last.is_tx_context() => &self.parameters[..self.parameters.len() - 1],
            _ => &self.parameters,
        }
    }
}

/// Object ownership as reported by the chain-state service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    AddressOwner(Address),
    ObjectOwner(ObjectId),
    Shared { initial_shared_version: u64 },
    Immutable,
}

/// Metadata for one resolved object, in request order within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: String,
    pub owner: Owner,
}

impl ObjectMetadata {
    /// Parse from one `sui_multiGetObjects` result entry's `data` field.
    pub fn from_json(data: &Value) -> Result<Self> {
        let object_id = data
            .get("objectId")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Object data missing 'objectId'"))?;
        let version = data
            .get("version")
            .and_then(json_u64)
            .ok_or_else(|| anyhow!("Object data missing 'version'"))?;
        let digest = data
            .get("digest")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Object data missing 'digest'"))?;
        let owner = parse_owner(
            data.get("owner")
                .ok_or_else(|| anyhow!("Object data missing 'owner'"))?,
        )?;

        Ok(Self {
            object_id: Address::from_hex_literal(object_id)?,
            version,
            digest: digest.to_string(),
            owner,
        })
    }
}

fn parse_owner(value: &Value) -> Result<Owner> {
    if let Some(s) = value.as_str() {
        if s == "Immutable" {
            return Ok(Owner::Immutable);
        }
        return Err(anyhow!("Unknown owner kind '{}'", s));
    }

    let obj = value
        .as_object()
        .ok_or_else(|| anyhow!("Owner is neither string nor object: {}", value))?;

    if let Some(addr) = obj.get("AddressOwner").and_then(|v| v.as_str()) {
        return Ok(Owner::AddressOwner(Address::from_hex_literal(addr)?));
    }
    if let Some(id) = obj.get("ObjectOwner").and_then(|v| v.as_str()) {
        return Ok(Owner::ObjectOwner(Address::from_hex_literal(id)?));
    }
    if let Some(shared) = obj.get("Shared") {
        let version = shared
            .get("initial_shared_version")
            .and_then(json_u64)
            .ok_or_else(|| anyhow!("Shared owner missing 'initial_shared_version'"))?;
        return Ok(Owner::Shared {
            initial_shared_version: version,
        });
    }

    Err(anyhow!("Unrecognized owner: {}", value))
}

/// Extract a u64 from a JSON value that may be a number or a decimal string
/// (the RPC encodes u64 fields both ways depending on the endpoint).
pub fn json_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_primitive_types() {
        assert_eq!(
            NormalizedType::from_json(&json!("U64")).unwrap(),
            NormalizedType::U64
        );
        assert!(NormalizedType::from_json(&json!("Nope")).is_err());
    }

    #[test]
    fn test_parse_struct_reference() {
        let value = json!({
            "MutableReference": {
                "Struct": {
                    "address": "0x2",
                    "module": "tx_context",
                    "name": "TxContext",
                    "typeArguments": []
                }
            }
        });
        let ty = NormalizedType::from_json(&value).unwrap();
        assert!(ty.is_tx_context());
        assert!(!ty.expects_object());
    }

    #[test]
    fn test_caller_parameters_drop_trailing_context() {
        let coin = NormalizedType::Struct {
            address: Address::SUI_FRAMEWORK,
            module: "coin".to_string(),
            name: "Coin".to_string(),
            type_arguments: vec![],
        };
        let ctx = NormalizedType::MutableReference(Box::new(NormalizedType::Struct {
            address: Address::SUI_FRAMEWORK,
            module: "tx_context".to_string(),
            name: "TxContext".to_string(),
            type_arguments: vec![],
        }));
        let func = NormalizedFunction {
            parameters: vec![coin.clone(), NormalizedType::U64, ctx],
        };
        assert_eq!(func.caller_parameters().len(), 2);

        // Context only drops from the tail.
        let func = NormalizedFunction {
            parameters: vec![coin, NormalizedType::U64],
        };
        assert_eq!(func.caller_parameters().len(), 2);
    }

    #[test]
    fn test_pure_tag_classification() {
        assert_eq!(
            NormalizedType::Vector(Box::new(NormalizedType::U8)).pure_tag(),
            Some(TypeTag::Vector(Box::new(TypeTag::U8)))
        );
        let coin = NormalizedType::Struct {
            address: Address::SUI_FRAMEWORK,
            module: "coin".to_string(),
            name: "Coin".to_string(),
            type_arguments: vec![],
        };
        assert_eq!(coin.pure_tag(), None);
        assert!(coin.expects_object());
        assert!(NormalizedType::TypeParameter(0).expects_object());

        let string = NormalizedType::Struct {
            address: Address::MOVE_STDLIB,
            module: "string".to_string(),
            name: "String".to_string(),
            type_arguments: vec![],
        };
        assert!(string.pure_tag().is_some());
        assert!(!string.expects_object());
    }

    #[test]
    fn test_object_metadata_from_json() {
        let data = json!({
            "objectId": "0x5",
            "version": "42",
            "digest": "9WzSXdrcVtHmqrQ1fvAKDhBrPMAJ8gz6BPDCZ7Wvpv4v",
            "owner": { "Shared": { "initial_shared_version": 6 } }
        });
        let meta = ObjectMetadata::from_json(&data).unwrap();
        assert_eq!(meta.version, 42);
        assert_eq!(
            meta.owner,
            Owner::Shared {
                initial_shared_version: 6
            }
        );

        let data = json!({
            "objectId": "0x5",
            "version": 7,
            "digest": "abc",
            "owner": { "AddressOwner": "0xa11ce" }
        });
        let meta = ObjectMetadata::from_json(&data).unwrap();
        assert!(matches!(meta.owner, Owner::AddressOwner(_)));
    }
}
