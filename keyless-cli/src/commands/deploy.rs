// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use keyless_tools::{ops, utils::format_gas};

use crate::{
    common_args::{ArtifactArgs, KeylessArgs, ProviderArgs},
    error::KeylessResult,
    utils::{print_field, GOOD},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    artifact: ArtifactArgs,
    #[command(flatten)]
    keyless: KeylessArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args, verbose: bool) -> KeylessResult {
    let config = args.keyless.config(verbose)?;
    let built = args.artifact.built()?;
    let chain = args.provider.build_chain().await?;

    let result = ops::deploy_deployer(&chain, built.as_deref(), &config).await?;
    match &result.broadcast {
        None => println!("{GOOD}Deployer already deployed{GOOD:#}"),
        Some(receipt) => {
            println!("{GOOD}Deployer deployed{GOOD:#}");
            print_field("tx hash", receipt.transaction_hash);
            print_field("block hash", receipt.block_hash);
            if let Some(block_number) = receipt.block_number {
                print_field("block number", block_number);
            }
            print_field("gas used", format_gas(receipt.gas_used));
        }
    }
    print_field("deployer address", result.contract_address);
    print_field("keyless account", result.keyless_account);
    if let Some(mismatch) = &result.bytecode_mismatch {
        print_field("bytecode mismatch", format!("{:?}", mismatch.kind));
    }
    Ok(())
}
