// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory chain for exercising deployments without a node.

use std::{collections::HashMap, time::Duration};

use alloy::{
    primitives::{keccak256, Address, Bytes, TxHash, B256, U256},
    transports::{TransportErrorKind, TransportResult},
};
use parking_lot::Mutex;

use crate::core::{
    chain::{ChainClient, Receipt},
    keyless::{gas::estimate_creation_gas, recover_raw},
};

#[derive(Debug, Default)]
struct MockState {
    block_number: u64,
    code: HashMap<Address, Bytes>,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    receipts: HashMap<TxHash, Receipt>,
    /// Runtime code installed for a given initcode hash. Defaults to the initcode itself.
    runtimes: HashMap<B256, Bytes>,
    sent: Vec<Bytes>,
    calls: usize,
    hold_receipts: bool,
    receipt_fault: Option<ReceiptFault>,
}

/// A way for a mined receipt to disagree with the transaction that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptFault {
    /// The creation ran out of gas or reverted.
    Reverted,
    /// The receipt carries no contract address.
    NoContractAddress,
    /// The receipt names a different contract address.
    ContractAddress(Address),
}

/// A chain that executes keyless contract creations by bookkeeping alone.
///
/// Raw transactions are decoded and their sender recovered; nonce and balance are enforced the
/// way a node's admission would enforce them.
#[derive(Debug)]
pub struct MockChain {
    chain_id: u64,
    latency: Duration,
    state: Mutex<MockState>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            latency: Duration::ZERO,
            state: Mutex::default(),
        }
    }

    /// Delays every call, letting concurrent callers interleave.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn fund(&self, account: Address, amount: U256) {
        *self.state.lock().balances.entry(account).or_default() += amount;
    }

    pub fn set_nonce(&self, account: Address, nonce: u64) {
        self.state.lock().nonces.insert(account, nonce);
    }

    pub fn set_code(&self, address: Address, code: Bytes) {
        self.state.lock().code.insert(address, code);
    }

    /// Installs `runtime` when `initcode` is deployed.
    pub fn register_runtime(&self, initcode: &[u8], runtime: Bytes) {
        self.state.lock().runtimes.insert(keccak256(initcode), runtime);
    }

    /// While set, transactions are accepted but never mined.
    pub fn hold_receipts(&self, hold: bool) {
        self.state.lock().hold_receipts = hold;
    }

    /// Every receipt mined from now on carries `fault`.
    pub fn fault_receipts(&self, fault: ReceiptFault) {
        self.state.lock().receipt_fault = Some(fault);
    }

    pub fn code_at(&self, address: Address) -> Bytes {
        self.state.lock().code.get(&address).cloned().unwrap_or_default()
    }

    /// Raw transactions accepted so far.
    pub fn sent(&self) -> Vec<Bytes> {
        self.state.lock().sent.clone()
    }

    /// Number of chain calls served so far.
    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }

    async fn enter(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.state.lock().calls += 1;
    }
}

impl ChainClient for MockChain {
    async fn chain_id(&self) -> TransportResult<u64> {
        self.enter().await;
        Ok(self.chain_id)
    }

    async fn get_code(&self, address: Address) -> TransportResult<Bytes> {
        self.enter().await;
        Ok(self.code_at(address))
    }

    async fn get_block_number(&self) -> TransportResult<u64> {
        self.enter().await;
        Ok(self.state.lock().block_number)
    }

    async fn get_balance(&self, address: Address) -> TransportResult<U256> {
        self.enter().await;
        Ok(self
            .state
            .lock()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<TxHash> {
        self.enter().await;
        let (tx, sender) =
            recover_raw(raw).map_err(|err| TransportErrorKind::custom_str(&err.to_string()))?;

        let mut state = self.state.lock();
        let nonce = state.nonces.get(&sender).copied().unwrap_or_default();
        if tx.nonce != nonce {
            return Err(TransportErrorKind::custom_str(&format!(
                "nonce too low: address {sender}, tx: {} state: {nonce}",
                tx.nonce
            )));
        }
        let cost = U256::from(tx.gas_price) * U256::from(tx.gas_limit);
        let balance = state.balances.get(&sender).copied().unwrap_or_default();
        if balance < cost {
            return Err(TransportErrorKind::custom_str(
                "insufficient funds for gas * price + value",
            ));
        }

        state.balances.insert(sender, balance - cost);
        state.nonces.insert(sender, nonce + 1);
        state.block_number += 1;

        let contract_address = sender.create(tx.nonce);
        let runtime = state
            .runtimes
            .get(&keccak256(&tx.input))
            .cloned()
            .unwrap_or_else(|| tx.input.clone());
        state.code.insert(contract_address, runtime);

        let tx_hash = keccak256(raw);
        let block_number = state.block_number;
        let mut receipt = Receipt {
            transaction_hash: tx_hash,
            block_hash: Some(keccak256(block_number.to_be_bytes())),
            block_number: Some(block_number),
            contract_address: Some(contract_address),
            status: true,
            gas_used: estimate_creation_gas(&tx.input),
        };
        match state.receipt_fault {
            Some(ReceiptFault::Reverted) => {
                state.code.remove(&contract_address);
                receipt.status = false;
                receipt.contract_address = None;
                receipt.gas_used = tx.gas_limit;
            }
            Some(ReceiptFault::NoContractAddress) => receipt.contract_address = None,
            Some(ReceiptFault::ContractAddress(address)) => {
                receipt.contract_address = Some(address)
            }
            None => {}
        }
        state.receipts.insert(tx_hash, receipt);
        state.sent.push(Bytes::copy_from_slice(raw));
        Ok(tx_hash)
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> TransportResult<Option<Receipt>> {
        self.enter().await;
        let state = self.state.lock();
        if state.hold_receipts {
            return Ok(None);
        }
        Ok(state.receipts.get(&tx_hash).cloned())
    }
}
