// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use keyless_tools::ops;

use crate::{common_args::KeylessArgs, error::KeylessResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    keyless: KeylessArgs,
}

pub fn exec(args: Args, verbose: bool) -> KeylessResult {
    let config = args.keyless.config(verbose)?;
    let tx = ops::deployer_transaction(&config)?;
    if verbose {
        eprintln!("tx hash: {}", tx.tx_hash());
    }
    println!("0x{}", hex::encode(tx.raw()));
    Ok(())
}
