//! Pool registry port.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::error::Result;

/// Read-only lookup of liquidity pools by asset pair.
#[async_trait]
pub trait PoolRegistry: Send + Sync {
    /// Pool address for the pair, or `Address::ZERO` when none exists.
    async fn get_pool(&self, token_a: Address, token_b: Address) -> Result<Address>;
}
