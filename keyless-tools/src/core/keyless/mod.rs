// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Address precomputation for keyless deployments.
//!
//! The contract address depends only on the keyless account and nonce 0. The keyless account in
//! turn depends only on the fixed signature and the signing hash of
//! `(bytecode, gas price, gas limit)`. Neither the chain id nor any block context enters the
//! derivation, so the same parameters land at the same address on every chain.

use std::time::Duration;

use alloy::primitives::{Address, Bytes, SignatureError};

use crate::core::{
    bootstrap::BootstrapStage,
    chain::{bounded, ChainClient, ChainError},
    config::KeylessConfig,
    deployment::BroadcastReceipt,
    integrity::BytecodeMismatch,
};

pub use transaction::{
    recover_raw, KeylessSignature, RawTransactionError, UnsignedDeploymentTransaction,
    KEYLESS_SIGNATURE,
};

pub mod gas;
pub mod transaction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeylessDeploymentParams {
    pub bytecode: Bytes,
    /// Wei per gas. Zero is allowed here; admission is the network's call.
    pub gas_price: u128,
    pub gas_limit: u64,
}

impl KeylessDeploymentParams {
    pub fn new(bytecode: impl Into<Bytes>, gas_price: u128, gas_limit: u64) -> Self {
        Self {
            bytecode: bytecode.into(),
            gas_price,
            gas_limit,
        }
    }

    /// Params using the configured gas price and gas limit.
    pub fn with_config(bytecode: impl Into<Bytes>, config: &KeylessConfig) -> Self {
        Self::new(bytecode, config.gas_price, config.gas_limit)
    }
}

/// Everything that can be derived without touching a chain.
#[derive(Clone, Debug)]
pub struct Precomputed {
    pub tx: UnsignedDeploymentTransaction,
    pub keyless_account: Address,
    pub contract_address: Address,
    pub estimated_gas_cost: u64,
}

impl Precomputed {
    /// Checks the chain for existing code at the contract address.
    pub async fn resolve(
        self,
        chain: &impl ChainClient,
        timeout: Duration,
    ) -> Result<DeploymentResult, ChainError> {
        let code = bounded("eth_getCode", timeout, chain.get_code(self.contract_address)).await?;
        Ok(self.into_result(!code.is_empty()))
    }

    pub fn into_result(self, already_deployed: bool) -> DeploymentResult {
        DeploymentResult {
            contract_address: self.contract_address,
            keyless_account: self.keyless_account,
            already_deployed,
            estimated_gas_cost: self.estimated_gas_cost,
            broadcast: None,
            bytecode_mismatch: None,
        }
    }
}

/// Outcome of one precomputation or bootstrap run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_address: Address,
    pub keyless_account: Address,
    pub already_deployed: bool,
    pub estimated_gas_cost: u64,
    /// Present only when this run broadcast the deployment.
    pub broadcast: Option<BroadcastReceipt>,
    /// Advisory difference between the embedded and the locally built bytecode.
    pub bytecode_mismatch: Option<BytecodeMismatch>,
}

impl DeploymentResult {
    pub fn stage(&self) -> BootstrapStage {
        if self.already_deployed {
            BootstrapStage::AlreadyDeployed
        } else if self.broadcast.is_some() {
            BootstrapStage::Deployed
        } else {
            BootstrapStage::Computed
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PrecomputeError {
    #[error("empty bytecode")]
    EmptyBytecode,
    #[error("cost bound exceeded: estimated gas {estimated} > gas limit {gas_limit}")]
    CostBoundExceeded { estimated: u64, gas_limit: u64 },
    #[error("failed to recover keyless account: {0}")]
    Recovery(#[from] SignatureError),
    #[error("{0}")]
    Chain(#[from] ChainError),
}

/// Derives the keyless account, contract address and cost estimate for `params`.
///
/// Fails before any network interaction on empty bytecode or when the estimate exceeds the gas
/// limit.
pub fn precompute(params: &KeylessDeploymentParams) -> Result<Precomputed, PrecomputeError> {
    if params.bytecode.is_empty() {
        return Err(PrecomputeError::EmptyBytecode);
    }
    let estimated_gas_cost = gas::estimate_creation_gas(&params.bytecode);
    if estimated_gas_cost > params.gas_limit {
        return Err(PrecomputeError::CostBoundExceeded {
            estimated: estimated_gas_cost,
            gas_limit: params.gas_limit,
        });
    }

    let tx = UnsignedDeploymentTransaction::new(params);
    let keyless_account = tx.keyless_account()?;
    let contract_address = keyless_account.create(0);
    Ok(Precomputed {
        tx,
        keyless_account,
        contract_address,
        estimated_gas_cost,
    })
}

/// Precomputes `params` and checks whether the target chain already has the contract.
pub async fn compute(
    params: &KeylessDeploymentParams,
    chain: &impl ChainClient,
    timeout: Duration,
) -> Result<DeploymentResult, PrecomputeError> {
    let precomputed = precompute(params)?;
    Ok(precomputed.resolve(chain, timeout).await?)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, bytes};

    use super::*;
    use crate::{
        core::{config, fixtures},
        utils::testing::MockChain,
    };

    fn deployer_params() -> KeylessDeploymentParams {
        KeylessDeploymentParams::with_config(
            fixtures::DEPLOYER.bytecode().unwrap(),
            &KeylessConfig::default(),
        )
    }

    #[test]
    fn deployer_lands_at_configured_address() {
        let precomputed = precompute(&deployer_params()).unwrap();
        assert_eq!(precomputed.keyless_account, config::DEPLOYER_KEYLESS_ACCOUNT);
        assert_eq!(precomputed.contract_address, config::DEPLOYER_ADDRESS);
        assert_eq!(precomputed.estimated_gas_cost, 335_720);
    }

    #[test]
    fn factory_lands_at_known_address() {
        let params = KeylessDeploymentParams::new(
            bytes!("604580600e600039806000f350fe7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe03601600081602082378035828234f58015156039578182fd5b8082525050506014600cf3"),
            100_000_000_000,
            100_000,
        );
        let precomputed = precompute(&params).unwrap();
        assert_eq!(
            precomputed.contract_address,
            address!("0x4e59b44847b379578588920ca78fbf26c0b4956c")
        );
    }

    #[test]
    fn recomputation_is_deterministic() {
        let first = precompute(&deployer_params()).unwrap();
        for _ in 0..3 {
            let again = precompute(&deployer_params()).unwrap();
            assert_eq!(again.keyless_account, first.keyless_account);
            assert_eq!(again.contract_address, first.contract_address);
            assert_eq!(again.tx.raw(), first.tx.raw());
        }
    }

    #[test]
    fn empty_bytecode_fails() {
        let params = KeylessDeploymentParams::new(Bytes::new(), 1, 1_000_000);
        assert!(matches!(
            precompute(&params),
            Err(PrecomputeError::EmptyBytecode)
        ));
    }

    #[test]
    fn gas_limit_below_estimate_fails() {
        let mut params = deployer_params();
        params.gas_limit = 335_719;
        match precompute(&params) {
            Err(PrecomputeError::CostBoundExceeded {
                estimated,
                gas_limit,
            }) => {
                assert_eq!(estimated, 335_720);
                assert_eq!(gas_limit, 335_719);
            }
            other => panic!("expected cost bound failure, got {other:?}"),
        }
    }

    #[test]
    fn zero_gas_price_is_permitted() {
        let mut params = deployer_params();
        params.gas_price = 0;
        let precomputed = precompute(&params).unwrap();
        assert_ne!(precomputed.contract_address, config::DEPLOYER_ADDRESS);
    }

    #[tokio::test]
    async fn address_is_independent_of_chain() {
        let mainnet = MockChain::new(1);
        let rollup = MockChain::new(123);
        let a = compute(&deployer_params(), &mainnet, config::DEFAULT_TIMEOUT)
            .await
            .unwrap();
        let b = compute(&deployer_params(), &rollup, config::DEFAULT_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert!(!a.already_deployed);
        assert_eq!(a.stage(), BootstrapStage::Computed);
    }

    #[tokio::test]
    async fn detects_existing_code() {
        let chain = MockChain::new(7);
        chain.set_code(config::DEPLOYER_ADDRESS, bytes!("6080"));
        let result = compute(&deployer_params(), &chain, config::DEFAULT_TIMEOUT)
            .await
            .unwrap();
        assert!(result.already_deployed);
        assert_eq!(result.stage(), BootstrapStage::AlreadyDeployed);
        assert!(chain.sent().is_empty());
    }
}
