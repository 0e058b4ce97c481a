//! Exchange-agnostic types for paced batch swaps.

pub mod money;
pub mod outcome;
pub mod path;
pub mod task;

pub use money::{usd_to_native, Usd};
pub use outcome::{OutcomeRecord, SwapOutcome};
pub use path::{SwapPath, SwapPathBuilder, SwapStep, WithdrawMode, NATIVE_ASSET};
pub use task::{OrderMode, WalletTask};
