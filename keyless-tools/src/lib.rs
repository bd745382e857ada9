// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for keyless, address-deterministic contract deployments.
//!
//! A keyless deployment is a contract-creation transaction carrying a fixed, publicly known
//! signature. Recovering the sender from that signature yields an account nobody holds the key
//! for, so the resulting contract address is the same on every chain that accepts the
//! transaction.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

#[cfg(feature = "integration-tests")]
pub mod devnet;

pub use error::{Error, Result};
