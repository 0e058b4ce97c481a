//! Scriptable port implementations for orchestrator tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use batchswap::app::SwapServices;
use batchswap::domain::{usd_to_native, OutcomeRecord, SwapOutcome, SwapPath, Usd};
use batchswap::error::{LogWriteError, PriceError, Result};
use batchswap::port::{OutcomeSink, PoolRegistry, PriceOracle, SwapExecutor};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::watch;

/// Registry that always answers with the same pool.
pub struct StaticPools(pub Address);

#[async_trait]
impl PoolRegistry for StaticPools {
    async fn get_pool(&self, _token_a: Address, _token_b: Address) -> Result<Address> {
        Ok(self.0)
    }
}

/// Oracle with a fixed price that can fail on chosen calls (0-based).
pub struct FixedPrice {
    price: Decimal,
    failing_calls: HashSet<usize>,
    calls: AtomicUsize,
}

impl FixedPrice {
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            failing_calls: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for FixedPrice {
    async fn convert(&self, usd: Usd) -> std::result::Result<U256, PriceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_calls.contains(&call) {
            return Err(PriceError::Status(429));
        }
        usd_to_native(usd, self.price)
    }
}

/// Oracle whose lookups never complete.
#[derive(Default)]
pub struct StalledPrice {
    calls: AtomicUsize,
}

impl StalledPrice {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for StalledPrice {
    async fn convert(&self, _usd: Usd) -> std::result::Result<U256, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// One call seen by [`ScriptedExecutor`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub wallet: Address,
    pub value: U256,
    pub path: SwapPath,
    pub at: Instant,
}

/// How the executor treats a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Succeed,
    Fail,
    Panic,
}

/// Executor that succeeds unless scripted otherwise and records every call.
#[derive(Default)]
pub struct ScriptedExecutor {
    scripts: Vec<(Address, Script)>,
    cancel_on_submit: Option<watch::Sender<bool>>,
    submissions: Mutex<Vec<Submission>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, wallet: Address, script: Script) -> Self {
        self.scripts.push((wallet, script));
        self
    }

    /// Request cancellation from inside the first submission.
    pub fn cancelling(mut self, sender: watch::Sender<bool>) -> Self {
        self.cancel_on_submit = Some(sender);
        self
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    fn script_for(&self, wallet: Address) -> Script {
        self.scripts
            .iter()
            .find(|(address, _)| *address == wallet)
            .map_or(Script::Succeed, |(_, script)| *script)
    }
}

#[async_trait]
impl SwapExecutor for ScriptedExecutor {
    async fn submit(&self, signer: &PrivateKeySigner, value: U256, path: &SwapPath) -> SwapOutcome {
        let wallet = signer.address();
        let index = {
            let mut submissions = self.submissions.lock();
            submissions.push(Submission {
                wallet,
                value,
                path: path.clone(),
                at: Instant::now(),
            });
            submissions.len()
        };

        if let Some(sender) = &self.cancel_on_submit {
            let _ = sender.send(true);
        }

        match self.script_for(wallet) {
            Script::Succeed => SwapOutcome::success(format!("0x{index:064x}")),
            Script::Fail => SwapOutcome::failure("execution reverted: K"),
            Script::Panic => panic!("executor exploded"),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Sink that keeps records in memory, optionally refusing every write.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<OutcomeRecord>>,
    broken: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<OutcomeRecord> {
        self.records.lock().clone()
    }
}

impl OutcomeSink for RecordingSink {
    fn record(&self, record: &OutcomeRecord) -> std::result::Result<(), LogWriteError> {
        if self.broken {
            return Err(LogWriteError {
                path: "/dev/full".into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Handles kept by a test after building [`SwapServices`].
pub struct Harness {
    pub prices: Arc<FixedPrice>,
    pub executor: Arc<ScriptedExecutor>,
    pub sink: Arc<RecordingSink>,
    pub services: SwapServices,
}

impl Harness {
    pub fn new(pool: Address, prices: FixedPrice, executor: ScriptedExecutor) -> Self {
        Self::with_sink(pool, prices, executor, RecordingSink::new())
    }

    pub fn with_sink(
        pool: Address,
        prices: FixedPrice,
        executor: ScriptedExecutor,
        sink: RecordingSink,
    ) -> Self {
        let prices = Arc::new(prices);
        let executor = Arc::new(executor);
        let sink = Arc::new(sink);
        let services = SwapServices {
            pools: Arc::new(StaticPools(pool)),
            prices: prices.clone(),
            executor: executor.clone(),
            outcomes: sink.clone(),
        };
        Self {
            prices,
            executor,
            sink,
            services,
        }
    }
}
