// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::core::chain::RpcChain;

/// First prefunded Anvil dev account.
pub const DEVNET_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const DEVNET_CHAIN_ID: u64 = 412_346;

const ANVIL_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const ANVIL_IMAGE_TAG: &str = "v1.2.3";
const ANVIL_PORT: u16 = 8545;

/// A throwaway Anvil node.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts an Anvil node in the background. It is shut down when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#)
            .with_response_matcher_async(anvil_response_matcher);
        let container = GenericImage::new(ANVIL_IMAGE_NAME, ANVIL_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec![format!(
                "anvil --host 0.0.0.0 --port {ANVIL_PORT} --chain-id {DEVNET_CHAIN_ID}"
            )])
            .start()
            .await
            .wrap_err("failed to start Anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get Anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Create a provider funded with the dev account.
    pub async fn create_provider(&self) -> Result<impl Provider> {
        let signer: PrivateKeySigner = DEVNET_PRIVATE_KEY
            .parse()
            .wrap_err("failed to parse devnet private key")?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(self.rpc())
            .await?;
        Ok(provider)
    }

    pub async fn chain(&self) -> Result<RpcChain<impl Provider>> {
        Ok(RpcChain::new(self.create_provider().await?))
    }

    /// Transfers `amount` wei from the dev account to `account`.
    pub async fn fund(&self, account: Address, amount: U256) -> Result<()> {
        let provider = self.create_provider().await?;
        let tx = TransactionRequest::default()
            .with_to(account)
            .with_value(amount);
        provider.send_transaction(tx).await?.watch().await?;
        Ok(())
    }
}

async fn anvil_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{chain::ChainClient, config, config::KeylessConfig},
        ops,
    };

    #[tokio::test]
    async fn node_deploys_deployer() -> Result<()> {
        let devnode = Node::new().await?;
        let config = KeylessConfig::default();
        let tx = ops::deployer_transaction(&config)?;
        devnode
            .fund(config::DEPLOYER_KEYLESS_ACCOUNT, tx.required_balance())
            .await?;

        let chain = devnode.chain().await?;
        assert_eq!(chain.chain_id().await?, DEVNET_CHAIN_ID);

        let first = ops::deploy_deployer(&chain, None, &config).await?;
        assert_eq!(first.contract_address, config::DEPLOYER_ADDRESS);
        assert!(!first.already_deployed);
        // the constructor copies out everything past its 32-byte prologue
        let deployer = ops::deployer_bytecode(None)?;
        let code = chain.get_code(config::DEPLOYER_ADDRESS).await?;
        assert_eq!(code.len(), 0x501);
        assert_eq!(code, deployer.slice(32..));

        let second = ops::deploy_deployer(&chain, None, &config).await?;
        assert!(second.already_deployed);
        Ok(())
    }
}
