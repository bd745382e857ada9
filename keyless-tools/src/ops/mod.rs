// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use deployer::{
    calculate_deployer_address, calculate_gas_limit, deploy_deployer, deployer_bytecode,
    deployer_params, deployer_status, deployer_transaction, predict_proxy_address, proxy_bytecode,
    DeployerAddress,
};

mod deployer;
