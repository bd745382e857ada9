// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::TransportError),

    #[error("{0}")]
    Precompute(#[from] crate::core::keyless::PrecomputeError),
    #[error("{0}")]
    Chain(#[from] crate::core::chain::ChainError),
    #[error("{0}")]
    Broadcast(#[from] crate::core::deployment::BroadcastError),
    #[error("{0}")]
    Bootstrap(#[from] crate::core::bootstrap::BootstrapError),
    #[error("{0}")]
    Fixture(#[from] crate::core::fixtures::FixtureError),
    #[error("{0}")]
    Artifact(#[from] crate::core::integrity::ArtifactError),
}
