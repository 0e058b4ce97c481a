//! Swap path construction for the router's `swap(paths, ...)` entrypoint.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use serde::Deserialize;

/// Sentinel address standing for the chain's native asset.
pub const NATIVE_ASSET: Address = Address::ZERO;

/// How the pool releases the output asset on the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawMode {
    /// Keep the output inside the vault as an internal transfer.
    VaultTransfer,
    /// Withdraw and unwrap to the native asset.
    UnwrapNative,
    /// Withdraw as the wrapped token.
    #[default]
    KeepWrapped,
}

impl WithdrawMode {
    /// Wire value encoded into the step payload.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::VaultTransfer => 0,
            Self::UnwrapNative => 1,
            Self::KeepWrapped => 2,
        }
    }
}

/// One hop through a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapStep {
    pub pool: Address,
    pub data: Bytes,
    pub callback: Address,
    pub callback_data: Bytes,
}

/// A routed swap: ordered steps plus the spent asset and notional input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPath {
    steps: Vec<SwapStep>,
    token_in: Address,
    amount_in: U256,
}

impl SwapPath {
    /// Create a path. Returns `None` when `steps` is empty.
    #[must_use]
    pub fn new(steps: Vec<SwapStep>, token_in: Address, amount_in: U256) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            steps,
            token_in,
            amount_in,
        })
    }

    /// Steps in execution order. Never empty.
    pub fn steps(&self) -> &[SwapStep] {
        &self.steps
    }

    pub fn token_in(&self) -> Address {
        self.token_in
    }

    pub fn amount_in(&self) -> U256 {
        self.amount_in
    }
}

/// Builds single-step paths through one pool.
#[derive(Debug, Clone, Copy)]
pub struct SwapPathBuilder {
    spent_asset: Address,
    withdraw_mode: WithdrawMode,
}

impl SwapPathBuilder {
    /// `spent_asset` is the pool-side identifier of the asset being sold
    /// (the wrapped native token for native swaps).
    #[must_use]
    pub const fn new(spent_asset: Address, withdraw_mode: WithdrawMode) -> Self {
        Self {
            spent_asset,
            withdraw_mode,
        }
    }

    pub fn withdraw_mode(&self) -> WithdrawMode {
        self.withdraw_mode
    }

    /// Build a path spending the native asset through `pool`, delivering to
    /// `destination`. `amount_in` is the notional routed by the step.
    pub fn build(&self, pool: Address, destination: Address, amount_in: U256) -> SwapPath {
        let mode = U256::from(self.withdraw_mode.as_u8());
        let data = (self.spent_asset, destination, mode).abi_encode_params();
        let step = SwapStep {
            pool,
            data: Bytes::from(data),
            callback: Address::ZERO,
            callback_data: Bytes::new(),
        };
        SwapPath {
            steps: vec![step],
            token_in: NATIVE_ASSET,
            amount_in,
        }
    }
}
