// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod bootstrap;
pub mod chain;
pub mod config;
pub mod deployment;
pub mod fixtures;
pub mod integrity;
pub mod keyless;
