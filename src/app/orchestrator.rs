//! Batch orchestration: ordering, pacing and per-wallet failure isolation.
//!
//! A run moves through `Idle -> ConfigLoaded -> PoolResolved -> Processing ->
//! Done`. A missing pool aborts before any wallet is touched. Operator
//! cancellation ends the run in `Cancelled` at the next suspension point
//! that allows it; a submitted swap is always awaited to its outcome.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use futures_util::FutureExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::app::config::RunConfig;
use crate::app::pacing::{arrange, draw_delay_ms, draw_swap_usd};
use crate::domain::{OutcomeRecord, SwapOutcome, SwapPathBuilder, WalletTask};
use crate::error::{Error, Result};
use crate::port::{OutcomeSink, PoolRegistry, PriceOracle, SwapExecutor};

/// Lifecycle of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ConfigLoaded,
    PoolResolved,
    Processing,
    Done,
    Aborted,
    Cancelled,
}

/// Counts for a finished (or cancelled) run.
///
/// Failed wallets do not make the run itself fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// External collaborators, constructed once and shared for the whole run.
#[derive(Clone)]
pub struct SwapServices {
    pub pools: Arc<dyn PoolRegistry>,
    pub prices: Arc<dyn PriceOracle>,
    pub executor: Arc<dyn SwapExecutor>,
    pub outcomes: Arc<dyn OutcomeSink>,
}

/// The fixed route every wallet swaps through.
#[derive(Debug, Clone)]
pub struct SwapRoute {
    /// Wrapped native token; also the spent asset encoded in the step.
    pub token_in: Address,
    pub token_out: Address,
    /// Notional routed by the step, independent of the attached value.
    pub amount_in: U256,
    pub pair_label: String,
    pub builder: SwapPathBuilder,
}

/// What happened to one wallet.
enum TaskResult {
    Completed(SwapOutcome),
    DryRun,
    Cancelled,
}

/// Runs the configured wallets one at a time.
pub struct BatchOrchestrator {
    services: SwapServices,
    route: SwapRoute,
    rng: StdRng,
    dry_run: bool,
    state: RunState,
}

impl BatchOrchestrator {
    pub fn new(services: SwapServices, route: SwapRoute) -> Self {
        Self {
            services,
            route,
            rng: StdRng::from_entropy(),
            dry_run: false,
            state: RunState::Idle,
        }
    }

    /// Make ordering and pacing draws reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Skip submission and outcome records; everything else still runs.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "Run state transition");
        self.state = next;
    }

    /// Process every configured wallet.
    ///
    /// Returns an error only for run-level failures (pool lookup); wallet
    /// failures are recorded and counted in the report.
    pub async fn run(
        &mut self,
        config: &RunConfig,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<RunReport> {
        self.transition(RunState::ConfigLoaded);

        let pool = match self.resolve_pool().await {
            Ok(pool) => pool,
            Err(e) => {
                self.transition(RunState::Aborted);
                return Err(e);
            }
        };
        info!(pool = %pool, pair = %self.route.pair_label, "Pool resolved");
        self.transition(RunState::PoolResolved);

        let mut wallets = config.wallets().to_vec();
        arrange(&mut wallets, config.order_mode(), &mut self.rng);

        let mut report = RunReport {
            total: wallets.len(),
            ..RunReport::default()
        };
        self.transition(RunState::Processing);

        let count = wallets.len();
        for (index, signer) in wallets.into_iter().enumerate() {
            if is_cancelled(&shutdown) {
                report.cancelled = true;
                break;
            }

            let task = WalletTask {
                signer,
                delay_ms: draw_delay_ms(config.min_delay_ms(), config.max_delay_ms(), &mut self.rng),
                swap_usd: draw_swap_usd(config.min_swap_usd(), config.max_swap_usd(), &mut self.rng),
            };
            info!(
                wallet = %task.address(),
                position = index + 1,
                total = count,
                delay_ms = task.delay_ms,
                usd = %task.swap_usd,
                "Processing wallet"
            );

            let result = AssertUnwindSafe(self.process(&task, pool, &mut shutdown))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    TaskResult::Completed(SwapOutcome::failure(format!(
                        "wallet task panicked: {}",
                        panic_message(panic.as_ref())
                    )))
                });

            match result {
                TaskResult::Completed(outcome) => {
                    report.processed += 1;
                    if outcome.is_success() {
                        report.succeeded += 1;
                    } else {
                        report.failed += 1;
                    }
                    self.record(&task, outcome);
                }
                TaskResult::DryRun => report.processed += 1,
                TaskResult::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            }

            if index + 1 < count && !self.pace(task.delay_ms, &mut shutdown).await {
                report.cancelled = true;
                break;
            }
        }

        if report.cancelled {
            warn!(processed = report.processed, total = report.total, "Batch cancelled");
            self.transition(RunState::Cancelled);
        } else {
            self.transition(RunState::Done);
        }
        Ok(report)
    }

    async fn resolve_pool(&self) -> Result<Address> {
        let pool = self
            .services
            .pools
            .get_pool(self.route.token_in, self.route.token_out)
            .await?;
        if pool == Address::ZERO {
            return Err(Error::PoolNotFound {
                token_a: self.route.token_in,
                token_b: self.route.token_out,
            });
        }
        Ok(pool)
    }

    async fn process(
        &self,
        task: &WalletTask,
        pool: Address,
        shutdown: &mut watch::Receiver<bool>,
    ) -> TaskResult {
        let converted = tokio::select! {
            biased;
            _ = cancelled(shutdown) => return TaskResult::Cancelled,
            converted = self.services.prices.convert(task.swap_usd) => converted,
        };
        let value = match converted {
            Ok(value) => value,
            Err(e) => {
                warn!(wallet = %task.address(), error = %e, "Price lookup failed");
                return TaskResult::Completed(SwapOutcome::failure(e.to_string()));
            }
        };

        let path = self
            .route
            .builder
            .build(pool, task.address(), self.route.amount_in);

        if self.dry_run {
            info!(
                wallet = %task.address(),
                native_wei = %value,
                amount_in = %path.amount_in(),
                "Dry run: swap not submitted"
            );
            return TaskResult::DryRun;
        }

        // Not cancellable from here on: a submitted swap is awaited to the end.
        let outcome = self
            .services
            .executor
            .submit(&task.signer, value, &path)
            .await;

        match &outcome {
            SwapOutcome::Succeeded { tx_hash } => {
                info!(wallet = %task.address(), native_wei = %value, tx_hash = %tx_hash, "Swap succeeded");
            }
            SwapOutcome::Failed { reason } => {
                warn!(
                    wallet = %task.address(),
                    executor = self.services.executor.name(),
                    error = %reason,
                    "Swap failed"
                );
            }
        }
        TaskResult::Completed(outcome)
    }

    fn record(&self, task: &WalletTask, outcome: SwapOutcome) {
        let record = OutcomeRecord {
            address: task.address(),
            outcome,
            delay_ms: task.delay_ms,
            pair_label: self.route.pair_label.clone(),
            usd: task.swap_usd,
        };
        if let Err(e) = self.services.outcomes.record(&record) {
            error!(wallet = %record.address, error = %e, "Failed to write outcome log");
        }
    }

    /// Sleep between wallets. Returns `false` when cancelled during the wait.
    async fn pace(&self, delay_ms: u64, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            biased;
            _ = cancelled(shutdown) => false,
            _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => true,
        }
    }
}

fn is_cancelled(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

/// Resolves once cancellation is requested. Never resolves if the sender is
/// dropped without requesting it.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
