//! Network endpoint selection.

const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";

pub fn infer_network_from_url(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    if lower.contains("testnet") {
        Some("testnet")
    } else if lower.contains("devnet") {
        Some("devnet")
    } else if lower.contains("mainnet") {
        Some("mainnet")
    } else {
        None
    }
}

pub fn default_rpc_endpoint(network: &str) -> String {
    match network {
        "testnet" => TESTNET_RPC.to_string(),
        "devnet" => DEVNET_RPC.to_string(),
        _ => MAINNET_RPC.to_string(),
    }
}

/// Resolve the RPC endpoint: explicit env override first, then the default
/// fullnode for the named network.
pub fn resolve_rpc_endpoint(network: &str) -> String {
    if let Ok(value) = std::env::var("SUI_RPC_ENDPOINT") {
        if !value.trim().is_empty() {
            return value;
        }
    }
    default_rpc_endpoint(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_network_from_url() {
        assert_eq!(
            infer_network_from_url("https://fullnode.testnet.sui.io:443"),
            Some("testnet")
        );
        assert_eq!(infer_network_from_url("http://localhost:9000"), None);
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(default_rpc_endpoint("testnet"), TESTNET_RPC);
        assert_eq!(default_rpc_endpoint("anything-else"), MAINNET_RPC);
    }
}
