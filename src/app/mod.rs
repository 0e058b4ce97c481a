//! Application wiring: build the adapters once and hand them to the
//! orchestrator.

pub mod config;
pub mod orchestrator;
pub mod pacing;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::adapter::outbound::binance::AveragePriceClient;
use crate::adapter::outbound::log_file::OutcomeLogFile;
use crate::adapter::outbound::syncswap::{self, PoolFactoryClient, RouterExecutor};
use crate::domain::SwapPathBuilder;
use crate::error::Result;

pub use config::{RunConfig, Settings};
pub use orchestrator::{BatchOrchestrator, RunReport, RunState, SwapRoute, SwapServices};

/// Per-invocation options that are not part of either config file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub wallets: PathBuf,
    pub dry_run: bool,
    pub seed: Option<u64>,
}

/// Entry point for a full batch run.
pub struct App;

impl App {
    /// Load the wallet file, connect to the chain and process every wallet.
    pub async fn run(
        settings: Settings,
        options: RunOptions,
        shutdown: watch::Receiver<bool>,
    ) -> Result<RunReport> {
        let config = RunConfig::load(&options.wallets)?;
        info!(
            wallets = config.wallets().len(),
            mode = %config.order_mode(),
            delay_ms = ?(config.min_delay_ms(), config.max_delay_ms()),
            usd = ?(config.min_swap_usd(), config.max_swap_usd()),
            "Wallet configuration loaded"
        );

        let contracts = settings.contracts.addresses()?;
        let provider = syncswap::connect(settings.rpc_url()?, config.wallets())?;
        syncswap::ensure_chain_id(&provider, settings.network.chain_id).await?;

        let prices = AveragePriceClient::new(settings.price_url()?, settings.price.timeout())?;
        let services = SwapServices {
            pools: Arc::new(PoolFactoryClient::new(
                provider.clone(),
                contracts.pool_factory,
            )),
            prices: Arc::new(prices),
            executor: Arc::new(RouterExecutor::new(
                provider,
                contracts.router,
                settings.route.deadline(),
            )),
            outcomes: Arc::new(OutcomeLogFile::new(settings.output.log_file.clone())),
        };

        let route = SwapRoute {
            token_in: contracts.token_in,
            token_out: contracts.token_out,
            amount_in: settings.route.amount_in(),
            pair_label: settings.route.pair_label.clone(),
            builder: SwapPathBuilder::new(contracts.token_in, settings.route.withdraw_mode),
        };

        let mut orchestrator = BatchOrchestrator::new(services, route).with_dry_run(options.dry_run);
        if let Some(seed) = options.seed {
            orchestrator = orchestrator.with_seed(seed);
        }
        orchestrator.run(&config, shutdown).await
    }
}
