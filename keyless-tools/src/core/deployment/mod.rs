// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Keyless broadcast.
//!
//! Funding the keyless account is up to the operator; this only checks that it happened.

use alloy::{
    primitives::{Address, SignatureError, TxHash, B256, U256},
    transports::TransportError,
};

use crate::{
    core::{
        chain::{ChainClient, ChainError},
        config::KeylessConfig,
        keyless::UnsignedDeploymentTransaction,
    },
    utils::color::DebugColor,
};

pub use request::BroadcastRequest;

pub mod request;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastReceipt {
    pub transaction_hash: TxHash,
    pub block_hash: B256,
    pub block_number: Option<u64>,
    /// Contract address as reported by the chain.
    pub contract_address: Address,
    pub gas_used: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("{0}")]
    Network(#[from] ChainError),
    #[error("broadcast rejected: {0}")]
    Rejected(TransportError),
    #[error(
        "not enough funds in keyless account {} to pay for deployment\n\
         balance {balance} wei < {required} wei\n\
         fund the account with a plain transfer before deploying",
        .account.debug_red(),
    )]
    NotEnoughFunds {
        account: Address,
        balance: U256,
        required: U256,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
    #[error("failed to recover keyless account: {0}")]
    Recovery(#[from] SignatureError),
}

/// Broadcasts `tx` from its keyless account and waits for inclusion.
pub async fn broadcast(
    tx: UnsignedDeploymentTransaction,
    chain: &impl ChainClient,
    config: &KeylessConfig,
) -> Result<BroadcastReceipt, BroadcastError> {
    let request = BroadcastRequest::new(tx, config.timeout, config.poll_interval)?;
    debug!(@grey, "keyless account: {}", request.keyless_account().debug_lavender());
    request.exec(chain).await
}
