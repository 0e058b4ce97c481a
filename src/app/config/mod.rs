//! Application configuration loading and validation.
//!
//! Two files drive a run: the TOML settings file (network, contracts, route,
//! price source, output) and the line-oriented wallet file read by
//! [`RunConfig`]. `RPC_URL` in the environment overrides the settings file.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod settings;
mod wallets;

pub use logging::LoggingConfig;
pub use settings::{
    ContractAddresses, ContractSettings, NetworkSettings, OutputSettings, PriceSettings,
    RouteSettings,
};
pub use wallets::{mask_key, RunConfig};

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.toml";

/// Main application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub contracts: ContractSettings,
    #[serde(default)]
    pub route: RouteSettings,
    #[serde(default)]
    pub price: PriceSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Load settings from `path` if it exists, otherwise use the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::from_toml("")
        }
    }

    /// Parse and validate settings from TOML text.
    #[allow(clippy::result_large_err)]
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(rpc_url) = std::env::var("RPC_URL") {
            if !rpc_url.trim().is_empty() {
                settings.network.rpc_url = rpc_url;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.rpc_url()?;
        self.price_url()?;
        self.contracts.addresses()?;
        if self.route.deadline_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "route.deadline_secs",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        if self.price.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "price.timeout_secs",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        if self.route.pair_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "route.pair_label",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Parsed RPC endpoint.
    #[allow(clippy::result_large_err)]
    pub fn rpc_url(&self) -> Result<url::Url> {
        parse_url("network.rpc_url", &self.network.rpc_url)
    }

    /// Parsed average-price endpoint.
    #[allow(clippy::result_large_err)]
    pub fn price_url(&self) -> Result<url::Url> {
        parse_url("price.url", &self.price.url)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[allow(clippy::result_large_err)]
fn parse_url(field: &'static str, value: &str) -> Result<url::Url> {
    value.parse().map_err(|e: url::ParseError| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}
