//! Address and object ID types with normalization utilities.
//!
//! This module is the canonical source for address handling in the workspace.
//! Other crates should import from here rather than defining their own logic.
//!
//! Sui addresses are 32-byte values, but they're often represented in different formats:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix: "2"

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Byte length of an address.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte account address.
///
/// Serializes as a fixed 32-byte array in binary formats (BCS) and as a
/// full-form hex literal in human-readable formats (JSON).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

/// Object ID type (32-byte address).
///
/// This is the canonical ObjectID type for the workspace.
pub type ObjectId = Address;

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Move stdlib package address (0x1).
    pub const MOVE_STDLIB: Address = Address::from_suffix(0x1);

    /// Sui framework package address (0x2).
    pub const SUI_FRAMEWORK: Address = Address::from_suffix(0x2);

    /// Sui system package address (0x3).
    pub const SUI_SYSTEM: Address = Address::from_suffix(0x3);

    const fn from_suffix(byte: u8) -> Address {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = byte;
        Address(bytes)
    }

    /// Construct from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a hex literal, accepting short ("0x2") and full forms.
    pub fn from_hex_literal(literal: &str) -> Result<Self> {
        let literal = literal.trim();
        let hex = literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"))
            .unwrap_or(literal);
        if hex.is_empty() || hex.len() > ADDRESS_LENGTH * 2 {
            return Err(anyhow!("invalid address literal '{}'", literal));
        }
        // Left-pad odd/short forms to the full 64 hex characters.
        let padded = format!("{:0>64}", hex);
        let raw = hex::decode(&padded)
            .map_err(|e| anyhow!("invalid address literal '{}': {}", literal, e))?;
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Full-form lowercase hex literal with 0x prefix and 64 hex characters.
    ///
    /// This is the canonical format for internal use and comparisons.
    pub fn to_canonical_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short-form hex literal with leading zeros trimmed ("0x2").
    pub fn to_hex_literal(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex_literal(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_canonical_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_hex_literal(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; ADDRESS_LENGTH]>::deserialize(deserializer)?;
            Ok(Address(bytes))
        }
    }
}

/// Normalize an address string to lowercase with 0x prefix and full 64 hex characters.
///
/// String-level normalization; does not validate hex digits. Use
/// [`Address::from_hex_literal`] when a parsed address is needed.
///
/// # Examples
///
/// ```
/// use sui_ptb_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    if hex.len() < 64 {
        format!("0x{:0>64}", hex)
    } else {
        format!("0x{}", &hex[..64])
    }
}

/// Normalize an address to short form (minimal hex digits).
///
/// Useful for display purposes.
pub fn normalize_address_short(addr: &str) -> String {
    let normalized = normalize_address(addr);
    let hex = normalized.strip_prefix("0x").unwrap_or(&normalized);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_literal_short_form() {
        let addr = Address::from_hex_literal("0x2").unwrap();
        assert_eq!(addr, Address::SUI_FRAMEWORK);
        assert_eq!(addr.to_hex_literal(), "0x2");
        assert_eq!(
            addr.to_canonical_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_from_hex_literal_rejects_garbage() {
        assert!(Address::from_hex_literal("not-hex").is_err());
        assert!(Address::from_hex_literal("").is_err());
        assert!(Address::from_hex_literal(&format!("0x{}", "a".repeat(65))).is_err());
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0xABC"),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
        assert_eq!(
            normalize_address("  0XABC  "),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
        assert_eq!(normalize_address_short("0x00abc"), "0xabc");
        assert_eq!(normalize_address_short("0x0"), "0x0");
    }

    #[test]
    fn test_bcs_is_fixed_width() {
        let addr = Address::from_hex_literal("0x2").unwrap();
        let bytes = bcs::to_bytes(&addr).unwrap();
        // Fixed 32-byte encoding, no length prefix.
        assert_eq!(bytes.len(), ADDRESS_LENGTH);
        assert_eq!(bytes[31], 2);
        let back: Address = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_json_is_hex_string() {
        let addr = Address::from_hex_literal("0x2").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json,
            "\"0x0000000000000000000000000000000000000000000000000000000000000002\""
        );
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
