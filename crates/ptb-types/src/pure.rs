//! Pure-value encoding: raw JSON values to type-tagged BCS bytes.
//!
//! Unresolved inputs carry raw JSON scalars/arrays. Once the expected
//! parameter type is known (statically or from a fetched signature), the raw
//! value is encoded here into the BCS bytes a `CallArg::Pure` carries.
//!
//! Accepted raw shapes per expected type:
//! - integers: JSON number, or decimal string (required above u64 range)
//! - `bool`: JSON bool
//! - `address` / `0x2::object::ID`: hex literal string
//! - `vector<u8>`: base64 string or array of numbers
//! - `vector<T>`: array of raw `T` values
//! - `0x1::string::String` / `0x1::ascii::String`: JSON string
//! - `0x1::option::Option<T>`: JSON null or raw `T` value

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

use crate::address::Address;
use crate::encoding::try_base64_decode;
use crate::type_tag::{StructTag, TypeTag};

/// Encode a raw JSON value as BCS bytes of the expected type.
pub fn encode_pure(value: &Value, tag: &TypeTag) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(value, tag, &mut out)?;
    Ok(out)
}

fn encode_into(value: &Value, tag: &TypeTag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        TypeTag::Bool => {
            let b = value
                .as_bool()
                .ok_or_else(|| mismatch(value, "bool"))?;
            out.push(b as u8);
        }
        TypeTag::U8 => out.push(int_value(value, u8::MAX as u128, "u8")? as u8),
        TypeTag::U16 => {
            let v = int_value(value, u16::MAX as u128, "u16")? as u16;
            out.extend_from_slice(&v.to_le_bytes());
        }
        TypeTag::U32 => {
            let v = int_value(value, u32::MAX as u128, "u32")? as u32;
            out.extend_from_slice(&v.to_le_bytes());
        }
        TypeTag::U64 => {
            let v = int_value(value, u64::MAX as u128, "u64")? as u64;
            out.extend_from_slice(&v.to_le_bytes());
        }
        TypeTag::U128 => {
            let v = int_value(value, u128::MAX, "u128")?;
            out.extend_from_slice(&v.to_le_bytes());
        }
        TypeTag::U256 => {
            let bytes = u256_le_bytes(value)?;
            out.extend_from_slice(&bytes);
        }
        TypeTag::Address => {
            let s = value
                .as_str()
                .ok_or_else(|| mismatch(value, "address"))?;
            out.extend_from_slice(Address::from_hex_literal(s)?.as_bytes());
        }
        TypeTag::Signer => bail!("signer values cannot be supplied as transaction inputs"),
        TypeTag::Vector(inner) => encode_vector(value, inner, out)?,
        TypeTag::Struct(s) => encode_pure_struct(value, s, out)?,
    }
    Ok(())
}

fn encode_vector(value: &Value, element: &TypeTag, out: &mut Vec<u8>) -> Result<()> {
    // vector<u8> additionally accepts base64 strings.
    if matches!(element, TypeTag::U8) {
        if let Some(s) = value.as_str() {
            let bytes = try_base64_decode(s)
                .ok_or_else(|| anyhow!("Expected base64 bytes for vector<u8>, got '{}'", s))?;
            write_uleb128(out, bytes.len());
            out.extend_from_slice(&bytes);
            return Ok(());
        }
    }

    let items = value
        .as_array()
        .ok_or_else(|| mismatch(value, &format!("vector<{}>", element)))?;
    write_uleb128(out, items.len());
    for item in items {
        encode_into(item, element, out)?;
    }
    Ok(())
}

/// Well-known struct wrappers that encode as pure values.
fn encode_pure_struct(value: &Value, tag: &StructTag, out: &mut Vec<u8>) -> Result<()> {
    let is_string = tag.is(Address::MOVE_STDLIB, "string", "String")
        || tag.is(Address::MOVE_STDLIB, "ascii", "String");
    if is_string {
        let s = value
            .as_str()
            .ok_or_else(|| mismatch(value, "string"))?;
        if tag.module == "ascii" && !s.is_ascii() {
            bail!("ascii::String value contains non-ASCII characters: '{}'", s);
        }
        write_uleb128(out, s.len());
        out.extend_from_slice(s.as_bytes());
        return Ok(());
    }

    if tag.is(Address::SUI_FRAMEWORK, "object", "ID") {
        let s = value
            .as_str()
            .ok_or_else(|| mismatch(value, "object ID"))?;
        out.extend_from_slice(Address::from_hex_literal(s)?.as_bytes());
        return Ok(());
    }

    if tag.is(Address::MOVE_STDLIB, "option", "Option") {
        let inner = tag
            .type_params
            .first()
            .ok_or_else(|| anyhow!("Option type missing its type parameter"))?;
        if value.is_null() {
            out.push(0);
        } else {
            out.push(1);
            encode_into(value, inner, out)?;
        }
        return Ok(());
    }

    bail!("Struct type {} is not pure-encodable", tag)
}

fn int_value(value: &Value, max: u128, what: &str) -> Result<u128> {
    let v = match value {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v as u128)
            .ok_or_else(|| mismatch(value, what))?,
        Value::String(s) => s
            .parse::<u128>()
            .map_err(|_| anyhow!("Expected decimal {} string, got '{}'", what, s))?,
        _ => return Err(mismatch(value, what)),
    };
    if v > max {
        bail!("Value {} out of range for {}", v, what);
    }
    Ok(v)
}

/// Parse a u256 from a JSON number or decimal string into little-endian bytes.
fn u256_le_bytes(value: &Value) -> Result<[u8; 32]> {
    let mut bytes = [0u8; 32];
    match value {
        Value::Number(n) => {
            let v = n.as_u64().ok_or_else(|| mismatch(value, "u256"))?;
            bytes[..8].copy_from_slice(&v.to_le_bytes());
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                bail!("Expected decimal u256 string, got '{}'", s);
            }
            // Schoolbook decimal accumulation over the byte array.
            for digit in s.bytes() {
                let mut carry = (digit - b'0') as u16;
                for byte in bytes.iter_mut() {
                    let v = (*byte as u16) * 10 + carry;
                    *byte = (v & 0xff) as u8;
                    carry = v >> 8;
                }
                if carry != 0 {
                    bail!("Value '{}' out of range for u256", s);
                }
            }
        }
        _ => return Err(mismatch(value, "u256")),
    }
    Ok(bytes)
}

/// Append a ULEB128-encoded length (the BCS sequence prefix).
fn write_uleb128(out: &mut Vec<u8>, mut n: usize) {
    loop {
        let mut byte = (n & 0x7f) as u8;
        n >>= 7;
        if n != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if n == 0 {
            break;
        }
    }
}

fn mismatch(value: &Value, expected: &str) -> anyhow::Error {
    anyhow!("Cannot encode {} as {}", value, expected)
}
