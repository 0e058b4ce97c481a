//! Port definitions for the batch-swap runtime.
//!
//! The orchestrator depends only on these traits; adapters provide the
//! chain, price API and log file implementations.

pub mod outbound;

pub use outbound::outcome::OutcomeSink;
pub use outbound::pool::PoolRegistry;
pub use outbound::price::PriceOracle;
pub use outbound::swap::SwapExecutor;
