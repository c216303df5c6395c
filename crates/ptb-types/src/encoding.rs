//! Encoding utilities for hex and base64.
//!
//! Provides shared encoding/decoding functions used across workspace crates.
//! These eliminate repetitive error handling patterns.

use anyhow::{anyhow, Result};

// =============================================================================
// Hex Parsing
// =============================================================================

/// Parse a hex string to raw bytes.
///
/// # Arguments
/// * `hex_str` - Hex string (with or without 0x prefix)
/// * `context` - Description for error messages (e.g., "object ID", "digest")
pub fn parse_hex_bytes(hex_str: &str, context: &str) -> Result<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| anyhow!("Invalid {} hex '{}': {}", context, hex_str, e))
}

// =============================================================================
// Base64 Encoding/Decoding
// =============================================================================

/// Encode bytes to base64 string.
pub fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 string to bytes with context-aware error message.
///
/// # Arguments
/// * `b64` - Base64 encoded string
/// * `context` - Description for error messages (e.g., "module bytecode", "pure bytes")
pub fn base64_decode(b64: &str, context: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| anyhow!("Failed to decode {} from base64: {}", context, e))
}

/// Decode base64 string to bytes, returning None on failure.
pub fn try_base64_decode(b64: &str) -> Option<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.decode(b64).ok()
}

// =============================================================================
// Serde helpers
// =============================================================================

/// Serde helper for `Vec<u8>` fields: base64 strings in human-readable formats
/// (JSON), raw byte vectors in binary formats (BCS).
pub mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&super::base64_encode(bytes))
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            super::base64_decode(&s, "bytes").map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

/// Serde helper for `Vec<Vec<u8>>` fields (module bytecode lists): lists of
/// base64 strings in human-readable formats, nested byte vectors in BCS.
pub mod base64_module_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(modules: &Vec<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let encoded: Vec<String> = modules.iter().map(|m| super::base64_encode(m)).collect();
            encoded.serialize(serializer)
        } else {
            modules.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let encoded = Vec::<String>::deserialize(deserializer)?;
            encoded
                .iter()
                .map(|s| super::base64_decode(s, "module bytecode").map_err(serde::de::Error::custom))
                .collect()
        } else {
            Vec::<Vec<u8>>::deserialize(deserializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let bytes = vec![1u8, 2, 3, 255];
        let encoded = base64_encode(&bytes);
        assert_eq!(base64_decode(&encoded, "test").unwrap(), bytes);
        assert_eq!(try_base64_decode(&encoded), Some(bytes));
        assert_eq!(try_base64_decode("not base64!!"), None);
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(parse_hex_bytes("0x0102", "test").unwrap(), vec![1, 2]);
        assert_eq!(parse_hex_bytes("0102", "test").unwrap(), vec![1, 2]);
        assert!(parse_hex_bytes("0xzz", "test").is_err());
    }
}
