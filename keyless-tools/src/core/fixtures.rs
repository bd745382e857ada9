// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Audited bytecode, keyed by content hash.

use alloy::primitives::{b256, keccak256, Bytes, B256};

use crate::utils::{color::DebugColor, decode0x};

#[derive(Debug)]
pub struct Fixture {
    pub name: &'static str,
    /// keccak-256 of the decoded bytecode.
    pub hash: B256,
    hex: &'static str,
}

/// The Deployer factory. Spawns [`PROXY`] instances with CREATE2.
pub const DEPLOYER: Fixture = Fixture {
    name: "Deployer",
    hash: b256!("1183dcf4a4925ef769b7ceb74efbdae4997c87b077d7cb2978198b20848fb1e2"),
    hex: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/deployer.hex")),
};

/// Minimal proxy created by the Deployer.
pub const PROXY: Fixture = Fixture {
    name: "Proxy",
    hash: b256!("14e00ac212ad74419d82c08cf072f2d28b443e000930e1c5f7171eed55f3e9ca"),
    hex: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/proxy.hex")),
};

pub const ALL: &[Fixture] = &[DEPLOYER, PROXY];

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture {name} is not valid hex: {source}")]
    Hex {
        name: &'static str,
        source: hex::FromHexError,
    },
    #[error("fixture {name} hash mismatch: expected {}, got {}", .expected.debug_lavender(), .actual.debug_red())]
    HashMismatch {
        name: &'static str,
        expected: B256,
        actual: B256,
    },
}

impl Fixture {
    /// Decodes the fixture, checking it against its content hash.
    pub fn bytecode(&self) -> Result<Bytes, FixtureError> {
        let code = decode0x(self.hex).map_err(|source| FixtureError::Hex {
            name: self.name,
            source,
        })?;
        let actual = keccak256(&code);
        if actual != self.hash {
            return Err(FixtureError::HashMismatch {
                name: self.name,
                expected: self.hash,
                actual,
            });
        }
        Ok(code.into())
    }
}

pub fn by_hash(hash: B256) -> Option<&'static Fixture> {
    ALL.iter().find(|fixture| fixture.hash == hash)
}
