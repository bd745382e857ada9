// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use keyless_tools::ops;

use crate::{
    common_args::{KeylessArgs, ProviderArgs},
    error::KeylessResult,
    utils::{print_field, WARNING},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// RPC endpoint to check for an existing deployment. Offline when omitted.
    #[arg(short, long)]
    endpoint: Option<String>,

    #[command(flatten)]
    keyless: KeylessArgs,
}

pub async fn exec(args: Args, verbose: bool) -> KeylessResult {
    let config = args.keyless.config(verbose)?;
    let address = ops::calculate_deployer_address(&config)?;
    print_field("keyless account", address.keyless_account);
    print_field("deployer address", address.deployer_address);
    if address.deployer_address != config.expected_address {
        eprintln!(
            "{WARNING}warning{WARNING:#}: these parameters do not produce the expected address {}",
            config.expected_address
        );
    }

    if let Some(endpoint) = args.endpoint {
        let chain = ProviderArgs { endpoint }.build_chain().await?;
        let status = ops::deployer_status(&chain, &config).await?;
        print_field("already deployed", status.already_deployed);
    }
    Ok(())
}
