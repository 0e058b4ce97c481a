//! Batchswap - paced native-asset swaps across a batch of wallets.
//!
//! Each configured wallet swaps a randomly sized USD amount of the chain's
//! native asset through a SyncSwap classic pool, with a random delay between
//! wallets. One wallet's failure never stops the batch; every attempt is
//! appended to an outcome log.
//!
//! # Modules
//!
//! - [`app`] - Config loading, pacing draws and the batch orchestrator
//! - [`domain`] - Swap paths, outcomes, wallet tasks and amount conversion
//! - [`port`] - Traits for the pool registry, price oracle, executor and log
//! - [`adapter`] - Binance price client, SyncSwap contracts, log file
//! - [`cli`] - Command-line definitions and handlers
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use batchswap::app::config::RunConfig;
//!
//! let config = RunConfig::load("wallets.txt").expect("valid wallet file");
//! println!("{} wallets, {} order", config.wallets().len(), config.order_mode());
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;
