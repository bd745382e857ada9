// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Submit a keyless deployment transaction and wait for it to land.

use std::time::Duration;

use alloy::primitives::{Address, TxHash};

use super::{BroadcastError, BroadcastReceipt};
use crate::{
    core::{
        chain::{bounded, ChainClient, ChainError, Receipt},
        keyless::UnsignedDeploymentTransaction,
    },
    utils::color::DebugColor,
};

/// A keyless transaction together with the account that has to pay for it.
#[derive(Debug)]
pub struct BroadcastRequest {
    tx: UnsignedDeploymentTransaction,
    keyless_account: Address,
    timeout: Duration,
    poll_interval: Duration,
}

impl BroadcastRequest {
    pub fn new(
        tx: UnsignedDeploymentTransaction,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Self, BroadcastError> {
        let keyless_account = tx.keyless_account()?;
        Ok(Self {
            tx,
            keyless_account,
            timeout,
            poll_interval,
        })
    }

    pub fn keyless_account(&self) -> Address {
        self.keyless_account
    }

    /// Sends the transaction once and waits for one confirmation.
    pub async fn exec(self, chain: &impl ChainClient) -> Result<BroadcastReceipt, BroadcastError> {
        let required = self.tx.required_balance();
        let balance = bounded(
            "eth_getBalance",
            self.timeout,
            chain.get_balance(self.keyless_account),
        )
        .await?;
        if balance < required {
            return Err(BroadcastError::NotEnoughFunds {
                account: self.keyless_account,
                balance,
                required,
            });
        }

        let block = bounded("eth_blockNumber", self.timeout, chain.get_block_number()).await?;
        debug!(@grey, "submitting keyless tx at block {block}");

        let raw = self.tx.raw();
        let tx_hash = bounded(
            "eth_sendRawTransaction",
            self.timeout,
            chain.send_raw_transaction(&raw),
        )
        .await
        .map_err(|err| match err {
            ChainError::Rpc(source) => BroadcastError::Rejected(source),
            other => other.into(),
        })?;
        debug!(@grey, "sent keyless tx: {}", tx_hash.debug_lavender());
        if tx_hash != self.tx.tx_hash() {
            warn!(@yellow, "node reported tx hash {tx_hash}, expected {}", self.tx.tx_hash());
        }

        let receipt = self.wait_for_receipt(chain, tx_hash).await?;
        if !receipt.status {
            return Err(BroadcastError::Reverted { tx_hash });
        }
        let contract_address = receipt
            .contract_address
            .ok_or(BroadcastError::NoContractAddress { tx_hash })?;
        Ok(BroadcastReceipt {
            transaction_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash.unwrap_or_default(),
            block_number: receipt.block_number,
            contract_address,
            gas_used: receipt.gas_used,
        })
    }

    /// Polls for a mined receipt. Polling is a read, so repeating it is harmless.
    async fn wait_for_receipt(
        &self,
        chain: &impl ChainClient,
        tx_hash: TxHash,
    ) -> Result<Receipt, ChainError> {
        let poll = async {
            loop {
                match chain.get_receipt(tx_hash).await {
                    Ok(Some(receipt)) if receipt.block_hash.is_some() => return Ok(receipt),
                    Ok(_) => tokio::time::sleep(self.poll_interval).await,
                    Err(err) => return Err(err),
                }
            }
        };
        bounded("eth_getTransactionReceipt", self.timeout, poll).await
    }
}
