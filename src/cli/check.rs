//! Handler for the `check` command.

use anyhow::Context;

use crate::app::config::RunConfig;
use crate::cli::{output, ConfigPaths};

/// Validate both config files and print what a run would use.
pub fn execute(paths: &ConfigPaths) -> anyhow::Result<()> {
    let settings = paths.load_settings().context("invalid settings")?;
    let config = RunConfig::load(&paths.wallets)
        .with_context(|| format!("invalid wallet file {}", paths.wallets.display()))?;
    let contracts = settings.contracts.addresses()?;

    output::section("Wallets");
    for (index, signer) in config.wallets().iter().enumerate() {
        output::key_value(&format!("#{}", index + 1), signer.address());
    }

    output::section("Pacing");
    output::key_value("Order", config.order_mode());
    output::key_value(
        "Delay",
        format!("{}-{}ms", config.min_delay_ms(), config.max_delay_ms()),
    );
    output::key_value(
        "Swap",
        format!("{}-{} USD", config.min_swap_usd(), config.max_swap_usd()),
    );

    output::section("Route");
    output::key_value("Pair", &settings.route.pair_label);
    output::key_value("Router", contracts.router);
    output::key_value("Factory", contracts.pool_factory);
    output::key_value("Withdraw", format!("{:?}", settings.route.withdraw_mode));
    output::key_value("Outcome log", settings.output.log_file.display());

    println!();
    output::ok("Configuration is valid");
    Ok(())
}
