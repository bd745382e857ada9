// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use keyless_tools::{
    core::integrity::{self, load_artifact, IntegrityStatus},
    ops,
};

use crate::{
    error::KeylessResult,
    utils::{print_field, GOOD, WARNING},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Locally built bytecode: a Hardhat or Foundry artifact, or a hex file.
    #[arg(long)]
    artifact: PathBuf,
    /// Compare against the Proxy instead of the Deployer.
    #[arg(long)]
    proxy: bool,
}

pub fn exec(args: Args) -> KeylessResult {
    let (name, expected) = if args.proxy {
        ("Proxy", ops::proxy_bytecode(None)?)
    } else {
        ("Deployer", ops::deployer_bytecode(None)?)
    };
    let built = load_artifact(&args.artifact)?;

    // advisory: a mismatch is reported but does not fail the command
    match integrity::verify(&expected, &built) {
        IntegrityStatus::Ok => println!("{GOOD}{name} bytecode matches{GOOD:#}"),
        IntegrityStatus::Mismatch(mismatch) => {
            println!("{WARNING}{name} bytecode differs{WARNING:#}");
            print_field("kind", format!("{:?}", mismatch.kind));
            print_field(
                "length",
                format!(
                    "embedded {}, built {}",
                    mismatch.expected_len, mismatch.actual_len
                ),
            );
            print_field("first difference", mismatch.first_difference);
            print_field("embedded hash", mismatch.expected_hash);
            print_field("built hash", mismatch.actual_hash);
        }
    }
    Ok(())
}
