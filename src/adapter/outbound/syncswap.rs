//! SyncSwap classic pool factory and router over JSON-RPC.
//!
//! A single wallet-aware provider is built at startup with every configured
//! signer registered; each swap selects its signer through the `from` field.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_provider::network::EthereumWallet;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{SwapOutcome, SwapPath};
use crate::error::{ConfigError, Error, Result, TransactionError};
use crate::port::{PoolRegistry, SwapExecutor};

mod abi {
    use alloy_sol_types::sol;

    sol! {
        #[sol(rpc)]
        contract IPoolFactory {
            function getPool(address tokenA, address tokenB) external view returns (address pool);
        }
    }

    sol! {
        struct SwapStep {
            address pool;
            bytes data;
            address callback;
            bytes callbackData;
        }

        struct SwapPath {
            SwapStep[] steps;
            address tokenIn;
            uint256 amountIn;
        }

        struct TokenAmount {
            address token;
            uint256 amount;
        }

        #[sol(rpc)]
        contract IRouter {
            function swap(SwapPath[] memory paths, uint256 amountOutMin, uint256 deadline)
                external
                payable
                returns (TokenAmount memory amountOut);
        }
    }
}

impl From<&SwapPath> for abi::SwapPath {
    fn from(path: &SwapPath) -> Self {
        Self {
            steps: path
                .steps()
                .iter()
                .map(|step| abi::SwapStep {
                    pool: step.pool,
                    data: step.data.clone(),
                    callback: step.callback,
                    callbackData: step.callback_data.clone(),
                })
                .collect(),
            tokenIn: path.token_in(),
            amountIn: path.amount_in(),
        }
    }
}

/// Build the shared provider, registering every signer with its wallet.
#[allow(clippy::result_large_err)]
pub fn connect(rpc_url: url::Url, signers: &[PrivateKeySigner]) -> Result<DynProvider> {
    let (first, rest) = signers.split_first().ok_or(ConfigError::NoWalletKeys)?;

    let mut wallet = EthereumWallet::from(first.clone());
    for signer in rest {
        wallet.register_signer(signer.clone());
    }

    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(rpc_url)
        .erased())
}

/// Fail unless the endpoint serves the expected chain.
pub async fn ensure_chain_id(provider: &DynProvider, expected: u64) -> Result<()> {
    let actual = provider
        .get_chain_id()
        .await
        .map_err(|e| Error::Rpc(format!("failed to get chain id: {e}")))?;

    if actual != expected {
        return Err(ConfigError::InvalidValue {
            field: "network.chain_id",
            reason: format!("endpoint serves chain {actual}, expected {expected}"),
        }
        .into());
    }
    debug!(chain_id = actual, "Chain id verified");
    Ok(())
}

/// Pool lookups through the classic pool factory.
pub struct PoolFactoryClient {
    provider: DynProvider,
    factory: Address,
}

impl PoolFactoryClient {
    pub fn new(provider: DynProvider, factory: Address) -> Self {
        Self { provider, factory }
    }
}

#[async_trait]
impl PoolRegistry for PoolFactoryClient {
    async fn get_pool(&self, token_a: Address, token_b: Address) -> Result<Address> {
        let factory = abi::IPoolFactory::new(self.factory, &self.provider);
        let pool: Address = factory
            .getPool(token_a, token_b)
            .call()
            .await
            .map_err(|e| Error::Rpc(format!("failed to look up pool: {e}")))?;
        Ok(pool)
    }
}

/// Swap submission through the router contract.
///
/// Swaps carry no minimum-output guard: `amountOutMin` is always zero.
pub struct RouterExecutor {
    provider: DynProvider,
    router: Address,
    deadline: Duration,
}

impl RouterExecutor {
    pub fn new(provider: DynProvider, router: Address, deadline: Duration) -> Self {
        Self {
            provider,
            router,
            deadline,
        }
    }

    fn deadline_timestamp(&self) -> U256 {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        U256::from(now.saturating_add(self.deadline.as_secs()))
    }

    async fn try_submit(
        &self,
        signer: &PrivateKeySigner,
        value: U256,
        path: &SwapPath,
    ) -> std::result::Result<String, TransactionError> {
        let router = abi::IRouter::new(self.router, &self.provider);
        let paths = vec![abi::SwapPath::from(path)];

        let pending = router
            .swap(paths, U256::ZERO, self.deadline_timestamp())
            .from(signer.address())
            .value(value)
            .send()
            .await
            .map_err(|e| TransactionError::Submission(e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        info!(wallet = %signer.address(), tx_hash = %tx_hash, "Swap submitted, awaiting confirmation");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| TransactionError::Confirmation(e.to_string()))?;

        if !receipt.status() {
            return Err(TransactionError::Reverted { tx_hash });
        }
        Ok(format!("{:?}", receipt.transaction_hash))
    }
}

#[async_trait]
impl SwapExecutor for RouterExecutor {
    async fn submit(&self, signer: &PrivateKeySigner, value: U256, path: &SwapPath) -> SwapOutcome {
        match self.try_submit(signer, value, path).await {
            Ok(tx_hash) => SwapOutcome::success(tx_hash),
            Err(e) => SwapOutcome::failure(e.reason()),
        }
    }

    fn name(&self) -> &'static str {
        "syncswap-router"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SwapPathBuilder, WithdrawMode, NATIVE_ASSET};
    use alloy_primitives::address;
    use alloy_sol_types::SolCall;

    #[test]
    fn converts_domain_path_to_router_struct() {
        let weth = address!("e5d7c2a44ffddf6b295a15c148167daaaf5cf34f");
        let pool = address!("00000000000000000000000000000000000000aa");
        let dest = address!("00000000000000000000000000000000000000bb");
        let path = SwapPathBuilder::new(weth, WithdrawMode::KeepWrapped).build(
            pool,
            dest,
            U256::from(100_000_000u64),
        );

        let encoded = abi::SwapPath::from(&path);
        assert_eq!(encoded.tokenIn, NATIVE_ASSET);
        assert_eq!(encoded.amountIn, U256::from(100_000_000u64));
        assert_eq!(encoded.steps.len(), 1);
        assert_eq!(encoded.steps[0].pool, pool);
        assert_eq!(encoded.steps[0].callback, Address::ZERO);
        assert!(encoded.steps[0].callbackData.is_empty());
        assert_eq!(encoded.steps[0].data, path.steps()[0].data);
    }

    #[test]
    fn swap_call_carries_zero_minimum_output() {
        let call = abi::IRouter::swapCall {
            paths: Vec::new(),
            amountOutMin: U256::ZERO,
            deadline: U256::from(1_700_001_800u64),
        };
        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], abi::IRouter::swapCall::SELECTOR.as_slice());
        // head: offset(paths), amountOutMin, deadline
        assert!(encoded[36..68].iter().all(|b| *b == 0));
    }
}
