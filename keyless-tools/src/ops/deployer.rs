// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Bootstrapping the Deployer factory and predicting the proxies it creates.

use alloy::primitives::{keccak256, Address, Bytes, B256};

use crate::{
    core::{
        bootstrap::ensure_deployed,
        chain::ChainClient,
        config::KeylessConfig,
        fixtures::{self, Fixture},
        integrity,
        keyless::{
            self, gas::estimate_creation_gas, precompute, DeploymentResult,
            KeylessDeploymentParams, UnsignedDeploymentTransaction,
        },
    },
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployerAddress {
    pub deployer_address: Address,
    pub keyless_account: Address,
}

/// Audited bytecode of `fixture`, checked against the locally built bytecode when given.
fn audited_bytecode(fixture: &Fixture, built: Option<&[u8]>) -> Result<Bytes> {
    let code = fixture.bytecode()?;
    if let Some(built) = built {
        integrity::check(fixture.name, &code, built);
    }
    Ok(code)
}

/// The Deployer creation code.
///
/// The embedded bytecode is always the one deployed. A differing local build only warns.
pub fn deployer_bytecode(built: Option<&[u8]>) -> Result<Bytes> {
    audited_bytecode(&fixtures::DEPLOYER, built)
}

/// The creation code of the proxies the Deployer spawns.
pub fn proxy_bytecode(built: Option<&[u8]>) -> Result<Bytes> {
    audited_bytecode(&fixtures::PROXY, built)
}

pub fn deployer_params(config: &KeylessConfig) -> Result<KeylessDeploymentParams> {
    Ok(KeylessDeploymentParams::with_config(
        deployer_bytecode(None)?,
        config,
    ))
}

/// The signed keyless transaction that creates the Deployer, ready for any chain.
pub fn deployer_transaction(config: &KeylessConfig) -> Result<UnsignedDeploymentTransaction> {
    Ok(precompute(&deployer_params(config)?)?.tx)
}

/// Computes where the Deployer lands, without any network access.
pub fn calculate_deployer_address(config: &KeylessConfig) -> Result<DeployerAddress> {
    let precomputed = precompute(&deployer_params(config)?)?;
    Ok(DeployerAddress {
        deployer_address: precomputed.contract_address,
        keyless_account: precomputed.keyless_account,
    })
}

/// Computes where the Deployer lands and whether `chain` already has it.
pub async fn deployer_status(
    chain: &impl ChainClient,
    config: &KeylessConfig,
) -> Result<DeploymentResult> {
    let result = keyless::compute(&deployer_params(config)?, chain, config.timeout).await?;
    Ok(result)
}

/// Estimated gas needed to create the Deployer.
pub fn calculate_gas_limit() -> Result<u64> {
    Ok(estimate_creation_gas(&deployer_bytecode(None)?))
}

/// Deploys the Deployer on `chain` unless it is already there.
pub async fn deploy_deployer(
    chain: &impl ChainClient,
    built: Option<&[u8]>,
    config: &KeylessConfig,
) -> Result<DeploymentResult> {
    let params = deployer_params(config)?;
    let result = ensure_deployed(&params, built, chain, config).await?;
    Ok(result)
}

/// Address of the proxy `deployer` creates for `salt`.
pub fn predict_proxy_address(deployer: Address, salt: B256) -> Result<Address> {
    let init_code_hash = keccak256(proxy_bytecode(None)?);
    Ok(deployer.create2(salt, init_code_hash))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{b256, U256};

    use super::*;
    use crate::{core::config, utils::testing::MockChain};

    #[test]
    fn deployer_address_is_known() {
        let address = calculate_deployer_address(&KeylessConfig::default()).unwrap();
        assert_eq!(address.deployer_address, config::DEPLOYER_ADDRESS);
        assert_eq!(address.keyless_account, config::DEPLOYER_KEYLESS_ACCOUNT);
    }

    #[test]
    fn gas_limit_covers_deployer() {
        let gas = calculate_gas_limit().unwrap();
        assert_eq!(gas, 335_720);
        assert!(gas <= config::GAS_LIMIT);
    }

    #[test]
    fn transaction_pays_full_gas_limit() {
        let tx = deployer_transaction(&KeylessConfig::default()).unwrap();
        let expected = U256::from(config::GAS_PRICE) * U256::from(config::GAS_LIMIT);
        assert_eq!(tx.required_balance(), expected);
        assert_eq!(
            tx.tx_hash(),
            b256!("fba731d2ae38bd004367ad9a0c5f6c1c7be127b26c4cfad750f9b74bce6e29b6")
        );
    }

    #[test]
    fn drifted_build_does_not_replace_audited_code() {
        let audited = deployer_bytecode(None).unwrap();
        let mut built = audited.to_vec();
        built[10] ^= 0x01;
        assert_eq!(deployer_bytecode(Some(&built[..])).unwrap(), audited);
    }

    #[test]
    fn proxy_address_follows_create2() {
        let salt = B256::with_last_byte(1);
        let proxy = proxy_bytecode(None).unwrap();

        let mut preimage = vec![0xff];
        preimage.extend_from_slice(config::DEPLOYER_ADDRESS.as_slice());
        preimage.extend_from_slice(salt.as_slice());
        preimage.extend_from_slice(keccak256(&proxy).as_slice());
        let expected = Address::from_slice(&keccak256(&preimage)[12..]);

        let predicted = predict_proxy_address(config::DEPLOYER_ADDRESS, salt).unwrap();
        assert_eq!(predicted, expected);
        assert_ne!(
            predicted,
            predict_proxy_address(config::DEPLOYER_ADDRESS, B256::ZERO).unwrap()
        );
    }

    #[tokio::test]
    async fn deploys_deployer_once() {
        let chain = MockChain::new(401);
        let config = KeylessConfig::default();
        let tx = deployer_transaction(&config).unwrap();
        chain.fund(config::DEPLOYER_KEYLESS_ACCOUNT, tx.required_balance());

        assert!(!deployer_status(&chain, &config).await.unwrap().already_deployed);
        let first = deploy_deployer(&chain, None, &config).await.unwrap();
        assert_eq!(first.contract_address, config::DEPLOYER_ADDRESS);
        assert!(first.broadcast.is_some());

        let second = deploy_deployer(&chain, None, &config).await.unwrap();
        assert!(second.already_deployed);
        assert!(deployer_status(&chain, &config).await.unwrap().already_deployed);
        assert_eq!(chain.sent(), vec![tx.raw()]);
    }
}
