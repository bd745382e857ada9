// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Idempotent, once-only keyless deployment.
//!
//! ```text
//! NotStarted -> Computed -> AlreadyDeployed
//!                        -> InvariantChecked -> Broadcasting -> Deployed
//! (any) -> Failed
//! ```
//!
//! Stage transitions are only logged at debug level. Callers read the outcome from the returned
//! [`DeploymentResult::stage`] or from the [`BootstrapError`] variant.

use std::{collections::HashMap, fmt, sync::Arc};

use alloy::primitives::{Address, TxHash};
use once_cell::sync::Lazy;
use tokio::sync::OwnedMutexGuard;

use crate::{
    core::{
        chain::{bounded, ChainClient, ChainError},
        config::KeylessConfig,
        deployment::{self, BroadcastError},
        integrity,
        keyless::{precompute, DeploymentResult, KeylessDeploymentParams, PrecomputeError},
    },
    utils::color::DebugColor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapStage {
    NotStarted,
    Computed,
    AlreadyDeployed,
    InvariantChecked,
    Broadcasting,
    Deployed,
    Failed,
}

impl BootstrapStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::AlreadyDeployed | Self::Deployed | Self::Failed)
    }
}

/// A derived value that disagrees with what it must be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invariant {
    /// The computed address is not the configured known-good address.
    ContractAddress { expected: Address, computed: Address },
    /// The chain confirmed a different address than the one computed.
    ConfirmedAddress { computed: Address, confirmed: Address },
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractAddress { expected, computed } => write!(
                f,
                "contract address mismatch: expected {}, computed {}",
                expected.debug_lavender(),
                computed.debug_red()
            ),
            Self::ConfirmedAddress {
                computed,
                confirmed,
            } => write!(
                f,
                "confirmed address mismatch: computed {}, chain reported {}",
                computed.debug_lavender(),
                confirmed.debug_red()
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("{0}")]
    Precompute(#[from] PrecomputeError),
    #[error("{0}")]
    Network(#[from] ChainError),
    #[error("invariant violation: {0}")]
    InvariantViolation(Invariant),
    #[error("{0}")]
    Broadcast(#[from] BroadcastError),
}

type LockKey = (u64, TxHash);
type DeployLock = Arc<tokio::sync::Mutex<()>>;

/// One lock per `(chain id, keyless transaction)`, held only while some run needs it.
static DEPLOY_LOCKS: Lazy<parking_lot::Mutex<HashMap<LockKey, DeployLock>>> =
    Lazy::new(Default::default);

/// Exclusive right to deploy for one key. Dropping it frees the registry entry once no other
/// run is waiting on it.
struct DeployGuard {
    key: LockKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for DeployGuard {
    fn drop(&mut self) {
        // release before inspecting the count so the guard's own reference is gone
        drop(self.guard.take());
        let mut locks = DEPLOY_LOCKS.lock();
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

async fn deploy_lock(chain_id: u64, tx_hash: TxHash) -> DeployGuard {
    let key = (chain_id, tx_hash);
    let lock = DEPLOY_LOCKS.lock().entry(key).or_default().clone();
    DeployGuard {
        key,
        guard: Some(lock.lock_owned().await),
    }
}

/// Makes sure the contract described by `params` exists on `chain`, deploying it if needed.
///
/// `built` is the locally built bytecode, if any. It is compared against `params.bytecode` and
/// a mismatch is reported on the result without stopping the deployment.
///
/// Concurrent calls for the same chain and parameters are serialized, so at most one of them
/// broadcasts.
pub async fn ensure_deployed(
    params: &KeylessDeploymentParams,
    built: Option<&[u8]>,
    chain: &impl ChainClient,
    config: &KeylessConfig,
) -> Result<DeploymentResult, BootstrapError> {
    let mut stage = BootstrapStage::NotStarted;
    let result = run(params, built, chain, config, &mut stage).await;
    if let Err(err) = &result {
        advance(&mut stage, BootstrapStage::Failed);
        debug!(@red, "bootstrap failed: {err}");
    }
    result
}

async fn run(
    params: &KeylessDeploymentParams,
    built: Option<&[u8]>,
    chain: &impl ChainClient,
    config: &KeylessConfig,
    stage: &mut BootstrapStage,
) -> Result<DeploymentResult, BootstrapError> {
    // local validation first, so a bad request never touches the network
    let precomputed = precompute(params)?;
    let contract_address = precomputed.contract_address;

    let chain_id = bounded("eth_chainId", config.timeout, chain.chain_id()).await?;
    let _guard = deploy_lock(chain_id, precomputed.tx.tx_hash()).await;

    let tx = precomputed.tx.clone();
    let mut result = precomputed.resolve(chain, config.timeout).await?;
    advance(stage, BootstrapStage::Computed);

    if result.already_deployed {
        advance(stage, BootstrapStage::AlreadyDeployed);
        greyln!(
            config.verbose,
            "contract ALREADY deployed at {} on chain {chain_id}",
            contract_address.debug_lavender()
        );
        return Ok(result);
    }

    if contract_address != config.expected_address {
        return Err(BootstrapError::InvariantViolation(
            Invariant::ContractAddress {
                expected: config.expected_address,
                computed: contract_address,
            },
        ));
    }
    advance(stage, BootstrapStage::InvariantChecked);

    if let Some(built) = built {
        result.bytecode_mismatch = integrity::check("contract", &params.bytecode, built);
    }

    advance(stage, BootstrapStage::Broadcasting);
    greyln!(
        config.verbose,
        "deploying from keyless account {}",
        result.keyless_account.debug_lavender()
    );
    let receipt = deployment::broadcast(tx, chain, config).await?;
    if receipt.contract_address != contract_address {
        return Err(BootstrapError::InvariantViolation(
            Invariant::ConfirmedAddress {
                computed: contract_address,
                confirmed: receipt.contract_address,
            },
        ));
    }
    advance(stage, BootstrapStage::Deployed);

    mintln!(
        config.verbose,
        "deployed tx hash: {}",
        receipt.transaction_hash.debug_lavender()
    );
    mintln!(
        config.verbose,
        "contract deployed at address: {}",
        contract_address.debug_lavender()
    );
    result.broadcast = Some(receipt);
    Ok(result)
}

fn advance(stage: &mut BootstrapStage, next: BootstrapStage) {
    debug!(@grey, "bootstrap: {:?} -> {:?}", stage, next);
    *stage = next;
}
