//! Price oracle port.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::domain::Usd;
use crate::error::PriceError;

/// Converts fiat amounts into the native asset using a live price.
///
/// Each call performs one independent lookup; implementations do not cache
/// or retry.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Convert `usd` into native-asset wei.
    async fn convert(&self, usd: Usd) -> Result<U256, PriceError>;
}
