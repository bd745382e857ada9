// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The slice of chain access keyless deployment needs.

use std::{future::Future, time::Duration};

use alloy::{
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::Provider,
    transports::{TransportError, TransportResult},
};

/// Inclusion receipt of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub contract_address: Option<Address>,
    pub status: bool,
    pub gas_used: u64,
}

/// Chain calls made while deploying. Implementations should not retry on their own.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    async fn chain_id(&self) -> TransportResult<u64>;

    async fn get_code(&self, address: Address) -> TransportResult<Bytes>;

    async fn get_block_number(&self) -> TransportResult<u64>;

    async fn get_balance(&self, address: Address) -> TransportResult<U256>;

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<TxHash>;

    /// `None` while the transaction is still pending.
    async fn get_receipt(&self, tx_hash: TxHash) -> TransportResult<Option<Receipt>>;
}

/// [`ChainClient`] over an alloy provider.
#[derive(Clone, Debug)]
pub struct RpcChain<P> {
    provider: P,
}

impl<P: Provider> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> ChainClient for RpcChain<P> {
    async fn chain_id(&self) -> TransportResult<u64> {
        self.provider.get_chain_id().await
    }

    async fn get_code(&self, address: Address) -> TransportResult<Bytes> {
        self.provider.get_code_at(address).await
    }

    async fn get_block_number(&self) -> TransportResult<u64> {
        self.provider.get_block_number().await
    }

    async fn get_balance(&self, address: Address) -> TransportResult<U256> {
        self.provider.get_balance(address).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<TxHash> {
        let pending = self.provider.send_raw_transaction(raw).await?;
        Ok(*pending.tx_hash())
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> TransportResult<Option<Receipt>> {
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;
        Ok(receipt.map(|receipt| Receipt {
            transaction_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
            contract_address: receipt.contract_address,
            status: receipt.status(),
            gas_used: receipt.gas_used,
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),
    #[error("network timeout: {operation} did not complete within {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// Runs one chain call, giving up after `after`.
pub async fn bounded<T>(
    operation: &'static str,
    after: Duration,
    call: impl Future<Output = TransportResult<T>>,
) -> Result<T, ChainError> {
    debug!(@grey, "{operation}");
    match tokio::time::timeout(after, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ChainError::Timeout { operation, after }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn bounded_call_times_out() {
        let never = std::future::pending::<TransportResult<u64>>();
        let err = bounded("eth_blockNumber", Duration::from_secs(3), never)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::Timeout {
                operation: "eth_blockNumber",
                after,
            } if after == Duration::from_secs(3)
        ));
    }

    #[tokio::test]
    async fn bounded_call_passes_errors_through() {
        let failing = async { Err::<u64, _>(alloy::transports::TransportErrorKind::custom_str("boom")) };
        let err = bounded("eth_chainId", Duration::from_secs(1), failing)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Rpc(_)));
    }
}
