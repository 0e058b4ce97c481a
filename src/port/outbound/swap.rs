//! Swap submission port.

use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::domain::{SwapOutcome, SwapPath};

/// Submits a swap and waits for it to settle.
///
/// This is the failure-isolation boundary for a wallet: implementations never
/// return an error, they fold every failure into [`SwapOutcome::Failed`].
#[async_trait]
pub trait SwapExecutor: Send + Sync {
    /// Submit `path` signed by `signer`, attaching `value` wei.
    async fn submit(&self, signer: &PrivateKeySigner, value: U256, path: &SwapPath)
        -> SwapOutcome;

    /// Executor name for logging.
    fn name(&self) -> &'static str;
}
