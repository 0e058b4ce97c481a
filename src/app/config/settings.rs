//! Network, contract and route settings loaded from TOML.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use serde::Deserialize;

use crate::domain::WithdrawMode;
use crate::error::{ConfigError, Result};

/// Chain RPC configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSettings {
    /// JSON-RPC endpoint. `RPC_URL` in the environment takes precedence.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Expected chain id, checked against the endpoint at startup.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
}

fn default_rpc_url() -> String {
    "https://rpc.linea.build".into()
}

const fn default_chain_id() -> u64 {
    59144
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
        }
    }
}

/// Contract addresses (Linea mainnet defaults).
#[derive(Debug, Clone, Deserialize)]
pub struct ContractSettings {
    #[serde(default = "default_router")]
    pub router: String,
    #[serde(default = "default_pool_factory")]
    pub pool_factory: String,
    /// Wrapped native token spent through the pool.
    #[serde(default = "default_token_in")]
    pub token_in: String,
    /// Token received.
    #[serde(default = "default_token_out")]
    pub token_out: String,
}

fn default_router() -> String {
    "0x80e38291e06339d10aab483c65695d004dbd5c69".into()
}

fn default_pool_factory() -> String {
    "0x37BAc764494c8db4e54BDE72f6965beA9fa0AC2d".into()
}

fn default_token_in() -> String {
    "0xe5d7c2a44ffddf6b295a15c148167daaaf5cf34f".into()
}

fn default_token_out() -> String {
    "0x176211869cA2b568f2A7D4EE941E073a821EE1ff".into()
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            router: default_router(),
            pool_factory: default_pool_factory(),
            token_in: default_token_in(),
            token_out: default_token_out(),
        }
    }
}

/// Parsed contract addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub router: Address,
    pub pool_factory: Address,
    pub token_in: Address,
    pub token_out: Address,
}

impl ContractSettings {
    /// Parse every configured address.
    #[allow(clippy::result_large_err)]
    pub fn addresses(&self) -> Result<ContractAddresses> {
        Ok(ContractAddresses {
            router: parse_address("contracts.router", &self.router)?,
            pool_factory: parse_address("contracts.pool_factory", &self.pool_factory)?,
            token_in: parse_address("contracts.token_in", &self.token_in)?,
            token_out: parse_address("contracts.token_out", &self.token_out)?,
        })
    }
}

fn parse_address(field: &'static str, value: &str) -> std::result::Result<Address, ConfigError> {
    Address::from_str(value.trim()).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

/// Swap route parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSettings {
    #[serde(default)]
    pub withdraw_mode: WithdrawMode,
    /// Fixed notional encoded into the path, in the token's smallest unit.
    #[serde(default = "default_amount_in")]
    pub amount_in: u64,
    /// Seconds from submission until the swap expires.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Label written to the outcome log.
    #[serde(default = "default_pair_label")]
    pub pair_label: String,
}

const fn default_amount_in() -> u64 {
    100_000_000
}

const fn default_deadline_secs() -> u64 {
    1800
}

fn default_pair_label() -> String {
    "ETH/USDC".into()
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            withdraw_mode: WithdrawMode::default(),
            amount_in: default_amount_in(),
            deadline_secs: default_deadline_secs(),
            pair_label: default_pair_label(),
        }
    }
}

impl RouteSettings {
    pub fn amount_in(&self) -> U256 {
        U256::from(self.amount_in)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

/// Average-price endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceSettings {
    #[serde(default = "default_price_url")]
    pub url: String,
    #[serde(default = "default_price_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_price_url() -> String {
    "https://api.binance.com/api/v3/avgPrice?symbol=ETHUSDC".into()
}

const fn default_price_timeout_secs() -> u64 {
    10
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            url: default_price_url(),
            timeout_secs: default_price_timeout_secs(),
        }
    }
}

impl PriceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Outcome log location.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_log_file")]
    pub log_file: std::path::PathBuf,
}

fn default_log_file() -> std::path::PathBuf {
    "logs.txt".into()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}
