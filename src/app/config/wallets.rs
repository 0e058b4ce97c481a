//! Line-oriented wallet file: keys, pacing bounds and ordering mode.
//!
//! ```text
//! wallets-private-keys: <hexkey1>,<hexkey2>,...
//! delay-in-ms-min: <int>
//! delay-in-ms-max: <int>
//! min-usd-swap: <float>
//! max-usd-swap: <float>
//! wallet-choose-mode: random|sequential
//! ```
//!
//! Unknown keys are ignored. Nothing is validated until the whole source has
//! been read, and a [`RunConfig`] only exists once every rule passes.

use std::path::Path;
use std::str::FromStr;

use alloy_signer_local::PrivateKeySigner;
use rust_decimal::Decimal;

use crate::domain::{OrderMode, Usd};
use crate::error::{ConfigError, Result};

const KEYS: &str = "wallets-private-keys";
const MIN_DELAY: &str = "delay-in-ms-min";
const MAX_DELAY: &str = "delay-in-ms-max";
const MIN_SWAP: &str = "min-usd-swap";
const MAX_SWAP: &str = "max-usd-swap";
const CHOOSE_MODE: &str = "wallet-choose-mode";

/// Validated, immutable run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    wallets: Vec<PrivateKeySigner>,
    min_delay_ms: u64,
    max_delay_ms: u64,
    min_swap_usd: Usd,
    max_swap_usd: Usd,
    order_mode: OrderMode,
}

/// Values as they appear in the file, before validation.
#[derive(Debug, Default)]
struct RawWalletFile {
    keys: Vec<String>,
    min_delay: Option<u64>,
    max_delay: Option<u64>,
    min_swap: Option<Decimal>,
    max_swap: Option<Decimal>,
    mode: Option<String>,
}

impl RawWalletFile {
    fn parse(content: &str) -> Self {
        let mut raw = Self::default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                KEYS => raw.keys = value.split(',').map(|k| k.trim().to_string()).collect(),
                MIN_DELAY => raw.min_delay = parse_delay(value),
                MAX_DELAY => raw.max_delay = parse_delay(value),
                MIN_SWAP => raw.min_swap = parse_usd(value),
                MAX_SWAP => raw.max_swap = parse_usd(value),
                CHOOSE_MODE => raw.mode = Some(value.to_string()).filter(|m| !m.is_empty()),
                _ => {}
            }
        }
        raw
    }

    fn validate(self) -> std::result::Result<RunConfig, ConfigError> {
        if self.keys.is_empty() || self.keys.iter().any(String::is_empty) {
            return Err(ConfigError::NoWalletKeys);
        }
        let wallets = self
            .keys
            .iter()
            .map(|key| {
                PrivateKeySigner::from_str(key)
                    .map_err(|_| ConfigError::InvalidWalletKey { key: mask_key(key) })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let min_delay_ms = self.min_delay.ok_or(ConfigError::MissingMinDelay)?;
        let max_delay_ms = self.max_delay.ok_or(ConfigError::MissingMaxDelay)?;
        if min_delay_ms > max_delay_ms {
            return Err(ConfigError::DelayBoundsInverted {
                min: min_delay_ms,
                max: max_delay_ms,
            });
        }

        let min_swap_usd = self.min_swap.ok_or(ConfigError::MissingMinSwap)?;
        let max_swap_usd = self.max_swap.ok_or(ConfigError::MissingMaxSwap)?;
        if min_swap_usd > max_swap_usd {
            return Err(ConfigError::SwapBoundsInverted {
                min: min_swap_usd,
                max: max_swap_usd,
            });
        }

        let mode = self.mode.ok_or(ConfigError::MissingChooseMode)?;
        let order_mode = mode
            .parse::<OrderMode>()
            .map_err(|value| ConfigError::InvalidChooseMode { value })?;

        Ok(RunConfig {
            wallets,
            min_delay_ms,
            max_delay_ms,
            min_swap_usd,
            max_swap_usd,
            order_mode,
        })
    }
}

/// Delays are read from their leading integer digits, so `100.5ms` is 100.
/// Zero, negative and non-numeric delays count as missing.
fn parse_delay(value: &str) -> Option<u64> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok().filter(|ms| *ms > 0)
}

/// Zero, negative and unparseable amounts count as missing.
fn parse_usd(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .ok()
        .filter(|usd| *usd > Decimal::ZERO)
}

/// Shorten a secret for display, keeping its first 6 and last 4 characters.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl RunConfig {
    /// Read and validate a wallet file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Ok(Self::parse(&content)?)
    }

    /// Parse and validate wallet file contents.
    pub fn parse(content: &str) -> std::result::Result<Self, ConfigError> {
        RawWalletFile::parse(content).validate()
    }

    /// Signers in file order.
    pub fn wallets(&self) -> &[PrivateKeySigner] {
        &self.wallets
    }

    pub fn min_delay_ms(&self) -> u64 {
        self.min_delay_ms
    }

    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms
    }

    pub fn min_swap_usd(&self) -> Usd {
        self.min_swap_usd
    }

    pub fn max_swap_usd(&self) -> Usd {
        self.max_swap_usd
    }

    pub fn order_mode(&self) -> OrderMode {
        self.order_mode
    }
}
