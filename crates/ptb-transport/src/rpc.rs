//! JSON-RPC client for the chain-state queries the builder needs.
//!
//! This is a thin blocking client over `ureq`; it exposes exactly the three
//! calls argument resolution consumes:
//! - `sui_getReferenceGasPrice`
//! - `sui_getNormalizedMoveFunction`
//! - `sui_multiGetObjects`
//!
//! Failures are surfaced immediately; retry policy belongs to the caller.
//!
//! ## Usage
//!
//! ```ignore
//! let client = RpcClient::mainnet();
//! let price = client.reference_gas_price()?;
//! let func = client.normalized_move_function(package, "pay", "split")?;
//! ```

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::debug;

use sui_ptb_types::normalized::{json_u64, NormalizedFunction, ObjectMetadata};
use sui_ptb_types::{Address, ObjectId};

use crate::network::resolve_rpc_endpoint;

/// Blocking JSON-RPC client for a Sui fullnode.
#[derive(Clone)]
pub struct RpcClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl RpcClient {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = std::env::var("SUI_RPC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs = std::env::var("SUI_RPC_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECS);
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client for mainnet.
    pub fn mainnet() -> Self {
        Self::new(&resolve_rpc_endpoint("mainnet"))
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::new(&resolve_rpc_endpoint("testnet"))
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one JSON-RPC 2.0 call and return its `result`.
    fn call(&self, method: &str, params: Value) -> Result<Value> {
        debug!(method, "rpc call");
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("RPC request '{}' failed: {}", method, e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse RPC response for '{}': {}", method, e))?;

        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(anyhow!("RPC error from '{}': {}", method, msg));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("No result in RPC response for '{}'", method))
    }

    /// Fetch the current reference gas price.
    pub fn reference_gas_price(&self) -> Result<u64> {
        let result = self.call("suix_getReferenceGasPrice", json!([]))?;
        json_u64(&result)
            .ok_or_else(|| anyhow!("Reference gas price is not a u64: {}", result))
    }

    /// Fetch the normalized signature of `package::module::function`.
    pub fn normalized_move_function(
        &self,
        package: Address,
        module: &str,
        function: &str,
    ) -> Result<NormalizedFunction> {
        let result = self.call(
            "sui_getNormalizedMoveFunction",
            json!([package.to_canonical_string(), module, function]),
        )?;
        NormalizedFunction::from_json(&result)
    }

    /// Batch-fetch object metadata. Result order matches request order.
    ///
    /// Any entry the node cannot resolve is an error for the whole batch;
    /// there is no partial success.
    pub fn multi_get_objects(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_strings: Vec<String> = ids.iter().map(|id| id.to_canonical_string()).collect();
        let result = self.call(
            "sui_multiGetObjects",
            json!([id_strings, { "showOwner": true }]),
        )?;

        let entries = result
            .as_array()
            .ok_or_else(|| anyhow!("multiGetObjects result is not an array"))?;
        if entries.len() != ids.len() {
            return Err(anyhow!(
                "multiGetObjects returned {} entries for {} ids",
                entries.len(),
                ids.len()
            ));
        }

        entries
            .iter()
            .zip(ids)
            .map(|(entry, id)| {
                if let Some(error) = entry.get("error") {
                    return Err(anyhow!(
                        "Object {} failed to resolve: {}",
                        id.to_hex_literal(),
                        error
                    ));
                }
                let data = entry.get("data").ok_or_else(|| {
                    anyhow!("Object {} response has no data", id.to_hex_literal())
                })?;
                ObjectMetadata::from_json(data)
            })
            .collect()
    }
}
