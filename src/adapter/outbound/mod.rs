//! Outbound adapters: price API, chain contracts and the outcome log.

pub mod binance;
pub mod log_file;
pub mod syncswap;
