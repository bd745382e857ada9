// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, B256};
use keyless_tools::{core::config, ops};

use crate::{error::KeylessResult, utils::print_field};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// CREATE2 salt passed to the Deployer.
    #[arg(long)]
    salt: B256,
    /// Address of the Deployer.
    #[arg(long, default_value_t = config::DEPLOYER_ADDRESS)]
    deployer: Address,
}

pub fn exec(args: Args) -> KeylessResult {
    let proxy = ops::predict_proxy_address(args.deployer, args.salt)?;
    print_field("proxy address", proxy);
    Ok(())
}
