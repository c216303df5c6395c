//! Move type tags with string parsing and canonical display.
//!
//! Provides the closed type-tag model used by commands and pure-value
//! encoding, plus parsing utilities for type strings like
//! `0x2::coin::Coin<0x2::sui::SUI>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A Move type tag.
///
/// Variant order matches Move's canonical BCS encoding (u16/u32/u256 were
/// appended after the original set), so derived serialization produces the
/// on-wire variant indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// A fully qualified Move struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// Whether this struct is `address::module::name` for the given parts.
    pub fn is(&self, address: Address, module: &str, name: &str) -> bool {
        self.address == address && self.module == module && self.name == name
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_hex_literal(),
            self.module,
            self.name
        )?;
        if !self.type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Parse a Move type string into a TypeTag.
///
/// Supports:
/// - Primitive types: `bool`, `u8`, `u16`, `u32`, `u64`, `u128`, `u256`, `address`, `signer`
/// - Vector types: `vector<T>`
/// - Struct types: `0x2::module::Struct` or `0x2::module::Struct<T1, T2>`
///
/// # Examples
///
/// ```
/// use sui_ptb_types::type_tag::parse_type_tag;
///
/// let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
/// assert_eq!(tag.to_string(), "0x2::coin::Coin<0x2::sui::SUI>");
/// ```
pub fn parse_type_tag(type_str: &str) -> Option<TypeTag> {
    let type_str = type_str.trim();

    // Handle primitive types
    match type_str {
        "bool" => return Some(TypeTag::Bool),
        "u8" => return Some(TypeTag::U8),
        "u16" => return Some(TypeTag::U16),
        "u32" => return Some(TypeTag::U32),
        "u64" => return Some(TypeTag::U64),
        "u128" => return Some(TypeTag::U128),
        "u256" => return Some(TypeTag::U256),
        "address" => return Some(TypeTag::Address),
        "signer" => return Some(TypeTag::Signer),
        _ => {}
    }

    // Handle vector types
    if let Some(inner) = type_str
        .strip_prefix("vector<")
        .and_then(|s| s.strip_suffix('>'))
    {
        let inner_tag = parse_type_tag(inner)?;
        return Some(TypeTag::Vector(Box::new(inner_tag)));
    }

    // Handle struct types: 0x<address>::<module>::<name><type_args>
    let (base_type, type_args_str) = if let Some(angle_pos) = type_str.find('<') {
        (&type_str[..angle_pos], Some(&type_str[angle_pos..]))
    } else {
        (type_str, None)
    };

    let parts: Vec<&str> = base_type.split("::").collect();
    if parts.len() != 3 {
        return None;
    }

    let address = Address::from_hex_literal(parts[0]).ok()?;
    let module = parts[1].trim();
    let name = parts[2].trim();
    if module.is_empty() || name.is_empty() {
        return None;
    }

    // Parse type arguments if present
    let type_params = if let Some(args_str) = type_args_str {
        parse_type_args(args_str)?
    } else {
        vec![]
    };

    Some(TypeTag::Struct(Box::new(StructTag {
        address,
        module: module.to_string(),
        name: name.to_string(),
        type_params,
    })))
}

/// Parse type arguments string like "<T1, T2, T3>".
fn parse_type_args(args_str: &str) -> Option<Vec<TypeTag>> {
    let inner = args_str.strip_prefix('<')?.strip_suffix('>')?;
    if inner.is_empty() {
        return Some(vec![]);
    }

    split_type_params(inner)
        .into_iter()
        .map(parse_type_tag)
        .collect()
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"] by tracking bracket depth.
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        result.push(s[start..].trim());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert!(matches!(parse_type_tag("bool"), Some(TypeTag::Bool)));
        assert!(matches!(parse_type_tag("u64"), Some(TypeTag::U64)));
        assert!(matches!(parse_type_tag("u256"), Some(TypeTag::U256)));
        assert!(matches!(parse_type_tag("address"), Some(TypeTag::Address)));
    }

    #[test]
    fn test_parse_vector() {
        let tag = parse_type_tag("vector<u8>").unwrap();
        assert!(matches!(tag, TypeTag::Vector(_)));
        assert_eq!(tag.to_string(), "vector<u8>");
    }

    #[test]
    fn test_parse_struct() {
        let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        if let TypeTag::Struct(s) = &tag {
            assert_eq!(s.module, "coin");
            assert_eq!(s.name, "Coin");
            assert_eq!(s.type_params.len(), 1);
        } else {
            panic!("Expected struct type");
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_type_tag("0x2::coin").is_none());
        assert!(parse_type_tag("vector<>").is_none());
        assert!(parse_type_tag("not a type").is_none());
    }

    #[test]
    fn test_split_type_params() {
        let params = split_type_params("u64, 0x2::coin::Coin<0x2::sui::SUI>, bool");
        assert_eq!(params.len(), 3);
        assert_eq!(params[0], "u64");
        assert_eq!(params[1], "0x2::coin::Coin<0x2::sui::SUI>");
        assert_eq!(params[2], "bool");
    }

    #[test]
    fn test_bcs_variant_order_is_stable() {
        // vector<u8> must encode as variant 6 wrapping variant 1.
        let bytes = bcs::to_bytes(&TypeTag::Vector(Box::new(TypeTag::U8))).unwrap();
        assert_eq!(bytes, vec![6, 1]);
        // Appended integer widths keep their late variant indices.
        assert_eq!(bcs::to_bytes(&TypeTag::U16).unwrap(), vec![8]);
        assert_eq!(bcs::to_bytes(&TypeTag::U256).unwrap(), vec![10]);
    }
}
