// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, time::Duration};

use alloy::{
    primitives::Address,
    providers::{Provider, ProviderBuilder},
};
use keyless_tools::core::{
    chain::RpcChain,
    config::{self, KeylessConfig},
    integrity::load_artifact,
};

use crate::{constants::DEFAULT_ENDPOINT, utils::convert_gwei_to_wei};

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// RPC endpoint of the target chain
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl ProviderArgs {
    pub async fn build_provider(&self) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&self.endpoint).await?;
        Ok(provider)
    }

    pub async fn build_chain(&self) -> eyre::Result<RpcChain<impl Provider>> {
        Ok(RpcChain::new(self.build_provider().await?))
    }
}

#[derive(Debug, clap::Args)]
pub struct KeylessArgs {
    /// Gas price of the keyless transaction in gwei. Changing it moves the Deployer address.
    #[arg(long)]
    gas_price_gwei: Option<String>,
    /// Gas limit of the keyless transaction. Changing it moves the Deployer address.
    #[arg(long, default_value_t = config::GAS_LIMIT)]
    gas_limit: u64,
    /// Address the Deployer must land at before anything is broadcast.
    #[arg(long, default_value_t = config::DEPLOYER_ADDRESS)]
    expected_address: Address,
    /// Upper bound on each network call, in seconds.
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl KeylessArgs {
    pub fn config(&self, verbose: bool) -> eyre::Result<KeylessConfig> {
        let gas_price = match &self.gas_price_gwei {
            Some(gwei) => convert_gwei_to_wei(gwei)?,
            None => config::GAS_PRICE,
        };
        Ok(KeylessConfig {
            gas_price,
            gas_limit: self.gas_limit,
            expected_address: self.expected_address,
            timeout: Duration::from_secs(self.timeout_secs),
            verbose,
            ..Default::default()
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Locally built bytecode to compare against the embedded bytecode: a Hardhat or Foundry
    /// artifact, or a hex file
    #[arg(long)]
    artifact: Option<PathBuf>,
}

impl ArtifactArgs {
    pub fn built(&self) -> eyre::Result<Option<Vec<u8>>> {
        let Some(path) = &self.artifact else {
            return Ok(None);
        };
        Ok(Some(load_artifact(path)?.to_vec()))
    }
}
