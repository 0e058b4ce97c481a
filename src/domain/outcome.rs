//! Per-wallet swap outcomes and the records written for them.

use alloy_primitives::Address;

use super::money::Usd;

const UNKNOWN_REASON: &str = "unknown error";

/// Result of one swap attempt.
///
/// A success always carries a transaction hash and a failure always carries
/// a non-empty reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Succeeded { tx_hash: String },
    Failed { reason: String },
}

impl SwapOutcome {
    pub fn success(tx_hash: impl Into<String>) -> Self {
        Self::Succeeded {
            tx_hash: tx_hash.into(),
        }
    }

    /// Build a failure. Blank reasons are replaced so the log never shows an
    /// empty error for a failed wallet.
    pub fn failure(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            UNKNOWN_REASON.to_string()
        } else {
            reason
        };
        Self::Failed { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        match self {
            Self::Succeeded { tx_hash } => Some(tx_hash),
            Self::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { reason } => Some(reason),
        }
    }
}

/// Everything the outcome log needs for one processed wallet.
#[derive(Debug, Clone)]
pub struct OutcomeRecord {
    pub address: Address,
    pub outcome: SwapOutcome,
    pub delay_ms: u64,
    pub pair_label: String,
    pub usd: Usd,
}

impl OutcomeRecord {
    /// Render the record as a log block, including the trailing blank line.
    pub fn to_block(&self) -> String {
        let result = if self.outcome.is_success() {
            "succeeded"
        } else {
            "failed"
        };
        format!(
            "Wallet address: {}\nResult: {}\nError: {}\nHash: {}\nDelay: {}ms\nPair: {}\nAmount: {}USDC\n\n",
            self.address,
            result,
            self.outcome.failure_reason().unwrap_or_default(),
            self.outcome.transaction_hash().unwrap_or_default(),
            self.delay_ms,
            self.pair_label,
            self.usd,
        )
    }
}
