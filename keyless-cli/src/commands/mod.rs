// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::KeylessResult;

mod address;
mod check_bytecode;
mod deploy;
mod gas;
mod proxy_address;
mod raw_tx;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the keyless account and the address the Deployer lands at
    #[clap(visible_alias = "a")]
    Address(address::Args),
    /// Compare a locally built Deployer or Proxy against the embedded bytecode
    #[clap(visible_alias = "c")]
    CheckBytecode(check_bytecode::Args),
    /// Deploy the Deployer unless it is already on the chain
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Print the estimated creation gas and the funding the keyless account needs
    #[clap(visible_alias = "g")]
    Gas(gas::Args),
    /// Print the address of the proxy the Deployer creates for a salt
    ProxyAddress(proxy_address::Args),
    /// Print the raw keyless transaction, for manual broadcast on any chain
    RawTx(raw_tx::Args),
}

pub async fn exec(cmd: Command, verbose: bool) -> KeylessResult {
    match cmd {
        Command::Address(args) => address::exec(args, verbose).await,
        Command::CheckBytecode(args) => check_bytecode::exec(args),
        Command::Deploy(args) => deploy::exec(args, verbose).await,
        Command::Gas(args) => gas::exec(args, verbose),
        Command::ProxyAddress(args) => proxy_address::exec(args),
        Command::RawTx(args) => raw_tx::exec(args, verbose),
    }
}
