//! Wallet ordering and per-wallet work items.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use super::money::Usd;

/// Order in which configured wallets are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// Keep file order.
    Sequential,
    /// Shuffle once before the loop starts.
    Random,
}

impl FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// One wallet's work for a single run, with its freshly drawn pacing.
#[derive(Debug, Clone)]
pub struct WalletTask {
    pub signer: PrivateKeySigner,
    pub delay_ms: u64,
    pub swap_usd: Usd,
}

impl WalletTask {
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}
