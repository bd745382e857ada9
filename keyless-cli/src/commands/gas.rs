// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use keyless_tools::{
    ops,
    utils::{format_eth, format_gas},
};

use crate::{common_args::KeylessArgs, error::KeylessResult, utils::print_field};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    keyless: KeylessArgs,
}

pub fn exec(args: Args, verbose: bool) -> KeylessResult {
    let config = args.keyless.config(verbose)?;
    print_field("estimated gas", format_gas(ops::calculate_gas_limit()?));
    print_field("gas limit", format_gas(config.gas_limit));

    // fails when the limit cannot cover the estimate
    let tx = ops::deployer_transaction(&config)?;
    let required = tx.required_balance();
    print_field(
        "required funding",
        format!("{} ({required} wei)", format_eth(required)),
    );
    print_field("keyless account", tx.keyless_account().map_err(eyre::Error::from)?);
    Ok(())
}
