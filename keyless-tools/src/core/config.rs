// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Process-wide constants for the Deployer bootstrap.

use std::time::Duration;

use alloy::primitives::{address, Address};

/// Gas price baked into the keyless Deployer transaction (100 gwei).
pub const GAS_PRICE: u128 = 100_000_000_000;

/// Gas limit baked into the keyless Deployer transaction.
pub const GAS_LIMIT: u64 = 500_000;

/// Address the Deployer lands at when the keyless transaction uses [`GAS_PRICE`] and
/// [`GAS_LIMIT`].
pub const DEPLOYER_ADDRESS: Address = address!("0x84ab290153e251ebfabccb237f6cac8570b87558");

/// Account recovered from the keyless Deployer transaction.
pub const DEPLOYER_KEYLESS_ACCOUNT: Address =
    address!("0xe921759e3da7a67f71a5a0b113cbe20909acd1a3");

/// Upper bound on every individual chain call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How often a pending receipt is polled for.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct KeylessConfig {
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Known-good address the computed contract address must match before broadcast.
    pub expected_address: Address,
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// Print address and transaction hash report lines.
    pub verbose: bool,
}

impl Default for KeylessConfig {
    fn default() -> Self {
        Self {
            gas_price: GAS_PRICE,
            gas_limit: GAS_LIMIT,
            expected_address: DEPLOYER_ADDRESS,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            verbose: false,
        }
    }
}
