//! Network transport layer for the sui-ptb workspace (JSON-RPC).

pub mod network;
pub mod rpc;

pub use network::{default_rpc_endpoint, infer_network_from_url, resolve_rpc_endpoint};
pub use rpc::RpcClient;
