#![allow(dead_code)]

pub mod ports;

use std::str::FromStr;

use alloy_primitives::{address, Address, U256};
use alloy_signer_local::PrivateKeySigner;
use batchswap::app::{RunConfig, SwapRoute};
use batchswap::domain::{SwapPathBuilder, WithdrawMode};

/// Well-known development keys (anvil/hardhat accounts 0-2).
pub const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_1: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const KEY_2: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

pub const ADDRESS_0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const WETH: Address = address!("e5d7c2a44ffddf6b295a15c148167daaaf5cf34f");
pub const USDC: Address = address!("176211869cA2b568f2A7D4EE941E073a821EE1ff");
pub const POOL: Address = address!("00000000000000000000000000000000000000aa");

pub fn address_of(key: &str) -> Address {
    PrivateKeySigner::from_str(key).expect("valid test key").address()
}

/// Render a wallet file in the line-oriented format.
pub fn wallet_file(keys: &[&str], delay: (u64, u64), usd: (&str, &str), mode: &str) -> String {
    format!(
        "wallets-private-keys: {}\n\
         delay-in-ms-min: {}\n\
         delay-in-ms-max: {}\n\
         min-usd-swap: {}\n\
         max-usd-swap: {}\n\
         wallet-choose-mode: {}\n",
        keys.join(","),
        delay.0,
        delay.1,
        usd.0,
        usd.1,
        mode
    )
}

pub fn run_config(keys: &[&str], delay: (u64, u64), usd: (&str, &str), mode: &str) -> RunConfig {
    RunConfig::parse(&wallet_file(keys, delay, usd, mode)).expect("valid wallet file")
}

/// Fresh random keys, hex encoded.
pub fn random_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| PrivateKeySigner::random().to_bytes().to_string())
        .collect()
}

pub fn route() -> SwapRoute {
    SwapRoute {
        token_in: WETH,
        token_out: USDC,
        amount_in: U256::from(100_000_000u64),
        pair_label: "ETH/USDC".into(),
        builder: SwapPathBuilder::new(WETH, WithdrawMode::KeepWrapped),
    }
}
