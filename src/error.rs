use std::path::PathBuf;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// The wallet-file variants are listed in the order validation checks them;
/// a load reports only the first one that applies.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no private keys found")]
    NoWalletKeys,

    #[error("invalid private key: {key} is not a valid private key")]
    InvalidWalletKey { key: String },

    #[error("no minimum delay found")]
    MissingMinDelay,

    #[error("no maximum delay found")]
    MissingMaxDelay,

    #[error("minimum delay {min}ms is greater than maximum delay {max}ms")]
    DelayBoundsInverted { min: u64, max: u64 },

    #[error("no minimum swap amount found")]
    MissingMinSwap,

    #[error("no maximum swap amount found")]
    MissingMaxSwap,

    #[error("minimum swap amount {min} is greater than maximum swap amount {max}")]
    SwapBoundsInverted { min: Decimal, max: Decimal },

    #[error("no wallet choose mode found")]
    MissingChooseMode,

    #[error("invalid wallet choose mode '{value}': must be random or sequential")]
    InvalidChooseMode { value: String },
}

/// Failures while turning a USD amount into a native amount.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("price request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("price endpoint returned status {0}")]
    Status(u16),

    #[error("failed to parse price response: {0}")]
    Parse(String),

    #[error("price must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("native amount out of range for {usd} USD at price {price}")]
    Overflow { usd: Decimal, price: Decimal },
}

/// Failures of a single swap submission.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("failed to submit swap: {0}")]
    Submission(String),

    #[error("failed to confirm swap: {0}")]
    Confirmation(String),

    #[error("swap transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },
}

impl TransactionError {
    /// Short human-readable reason suitable for the outcome log.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Failure to append a record to the outcome log.
#[derive(Error, Debug)]
#[error("failed to write outcome log {}: {source}", path.display())]
pub struct LogWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("pool does not exist for pair {token_a}/{token_b}")]
    PoolNotFound { token_a: Address, token_b: Address },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    LogWrite(#[from] LogWriteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
