//! The chain-state service the build pipeline consults.
//!
//! The builder never talks to the network directly; it is handed an
//! implementation of [`ChainState`]. The production implementation adapts the
//! blocking [`RpcClient`] onto the async trait; tests inject in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;

use sui_ptb_transport::RpcClient;
use sui_ptb_types::{Address, NormalizedFunction, ObjectId, ObjectMetadata};

/// Chain-state queries required by argument resolution.
#[async_trait]
pub trait ChainState: Send + Sync {
    /// Current reference gas price.
    async fn reference_gas_price(&self) -> Result<u64>;

    /// Normalized signature of `package::module::function`.
    async fn normalized_function(
        &self,
        package: Address,
        module: &str,
        function: &str,
    ) -> Result<NormalizedFunction>;

    /// Batch object metadata lookup. Result order matches request order.
    async fn object_batch(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>>;
}

#[async_trait]
impl ChainState for RpcClient {
    async fn reference_gas_price(&self) -> Result<u64> {
        let client = self.clone();
        Ok(tokio::task::spawn_blocking(move || client.reference_gas_price()).await??)
    }

    async fn normalized_function(
        &self,
        package: Address,
        module: &str,
        function: &str,
    ) -> Result<NormalizedFunction> {
        let client = self.clone();
        let module = module.to_string();
        let function = function.to_string();
        Ok(tokio::task::spawn_blocking(move || {
            client.normalized_move_function(package, &module, &function)
        })
        .await??)
    }

    async fn object_batch(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        let client = self.clone();
        let ids = ids.to_vec();
        Ok(tokio::task::spawn_blocking(move || client.multi_get_objects(&ids)).await??)
    }
}
