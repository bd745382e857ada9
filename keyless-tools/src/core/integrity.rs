// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compares audited bytecode against the bytecode the local toolchain produced.
//!
//! A mismatch is advisory. Compilers append a CBOR metadata block (source hash, compiler
//! version) whose bytes legitimately differ between environments, so callers log the mismatch
//! and carry on.

use std::{fs, path::Path};

use alloy::primitives::{keccak256, Bytes, B256};
use serde::Deserialize;

use crate::utils::{color::DebugColor, decode0x};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MismatchKind {
    /// Only the trailing compiler metadata differs.
    MetadataOnly,
    Code,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BytecodeMismatch {
    pub kind: MismatchKind,
    pub expected_len: usize,
    pub actual_len: usize,
    /// Offset of the first differing byte, or the shorter length if one is a prefix.
    pub first_difference: usize,
    pub expected_hash: B256,
    pub actual_hash: B256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegrityStatus {
    Ok,
    Mismatch(BytecodeMismatch),
}

impl IntegrityStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn mismatch(self) -> Option<BytecodeMismatch> {
        match self {
            Self::Ok => None,
            Self::Mismatch(mismatch) => Some(mismatch),
        }
    }
}

/// Byte-compares `expected` against `actual`.
pub fn verify(expected: &[u8], actual: &[u8]) -> IntegrityStatus {
    if expected == actual {
        return IntegrityStatus::Ok;
    }
    let first_difference = expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .unwrap_or(expected.len().min(actual.len()));
    let (expected_body, _) = split_metadata(expected);
    let (actual_body, _) = split_metadata(actual);
    let kind = if expected_body == actual_body {
        MismatchKind::MetadataOnly
    } else {
        MismatchKind::Code
    };
    IntegrityStatus::Mismatch(BytecodeMismatch {
        kind,
        expected_len: expected.len(),
        actual_len: actual.len(),
        first_difference,
        expected_hash: keccak256(expected),
        actual_hash: keccak256(actual),
    })
}

/// Runs [`verify`] and warns about any mismatch.
pub fn check(name: &str, expected: &[u8], actual: &[u8]) -> Option<BytecodeMismatch> {
    let mismatch = verify(expected, actual).mismatch()?;
    warn!(@yellow,
        "WARNING: {name} bytecode disparity ({:?}): embedded {} bytes {}, built {} bytes {}, first difference at byte {}",
        mismatch.kind,
        mismatch.expected_len,
        mismatch.expected_hash.debug_lavender(),
        mismatch.actual_len,
        mismatch.actual_hash.debug_lavender(),
        mismatch.first_difference
    );
    Some(mismatch)
}

/// Splits bytecode into its body and the trailing metadata block.
///
/// The last two bytes hold the big-endian length of the CBOR map that precedes them. When they
/// do not describe a plausible CBOR map, the whole input is returned as the body.
pub fn split_metadata(code: &[u8]) -> (&[u8], &[u8]) {
    let Some(len_bytes) = code.len().checked_sub(2).map(|at| &code[at..]) else {
        return (code, &[]);
    };
    let meta_len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
    let Some(start) = code.len().checked_sub(meta_len + 2) else {
        return (code, &[]);
    };
    // CBOR maps with up to 23 entries
    if meta_len == 0 || !(0xa1..=0xb7).contains(&code[start]) {
        return (code, &[]);
    }
    code.split_at(start)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Deserialize)]
struct Artifact {
    bytecode: ArtifactBytecode,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid bytecode hex in artifact: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Loads locally built creation bytecode.
///
/// Accepts Hardhat artifacts (`{"bytecode": "0x.."}`), Foundry artifacts
/// (`{"bytecode": {"object": "0x.."}}`) and plain hex files.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<Bytes, ArtifactError> {
    let text = fs::read_to_string(path)?;
    let code = if text.trim_start().starts_with('{') {
        let artifact: Artifact = serde_json::from_str(&text)?;
        match artifact.bytecode {
            ArtifactBytecode::Hex(code) => decode0x(code)?,
            ArtifactBytecode::Object { object } => decode0x(object)?,
        }
    } else {
        decode0x(text)?
    };
    Ok(code.into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::core::fixtures;

    fn deployer() -> Vec<u8> {
        fixtures::DEPLOYER.bytecode().unwrap().to_vec()
    }

    #[test]
    fn identical_code_is_ok() {
        assert!(verify(&deployer(), &deployer()).is_ok());
    }

    #[test]
    fn splits_solc_metadata() {
        let code = deployer();
        let (body, metadata) = split_metadata(&code);
        assert_eq!(metadata.len(), 0x32 + 2);
        assert_eq!(metadata[0], 0xa2);
        assert_eq!(body.len() + metadata.len(), code.len());
    }

    #[test]
    fn metadata_hash_difference_is_metadata_only() {
        let expected = deployer();
        let mut actual = expected.clone();
        // inside the swarm hash of the trailing metadata
        let at = actual.len() - 20;
        actual[at] ^= 0xff;
        let mismatch = verify(&expected, &actual).mismatch().unwrap();
        assert_eq!(mismatch.kind, MismatchKind::MetadataOnly);
        assert_eq!(mismatch.first_difference, at);
        assert_ne!(mismatch.expected_hash, mismatch.actual_hash);
    }

    #[test]
    fn code_difference_is_code() {
        let expected = deployer();
        let mut actual = expected.clone();
        actual[100] ^= 0x01;
        let mismatch = check("Deployer", &expected, &actual).unwrap();
        assert_eq!(mismatch.kind, MismatchKind::Code);
        assert_eq!(mismatch.first_difference, 100);
    }

    #[test]
    fn truncated_code_reports_prefix_length() {
        let expected = deployer();
        let actual = &expected[..64];
        let mismatch = verify(&expected, actual).mismatch().unwrap();
        assert_eq!(mismatch.first_difference, 64);
        assert_eq!(mismatch.actual_len, 64);
    }

    #[test]
    fn code_without_metadata_has_empty_trailer() {
        let code = [0x60, 0x00, 0x60, 0x00, 0xf3];
        let (body, metadata) = split_metadata(&code);
        assert_eq!(body, &code[..]);
        assert!(metadata.is_empty());
        let (body, metadata) = split_metadata(&[0x01]);
        assert_eq!(body, &[0x01u8][..]);
        assert!(metadata.is_empty());
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_hardhat_foundry_and_hex_artifacts() {
        let hardhat = write_temp(r#"{"contractName": "Proxy", "bytecode": "0x6080ff"}"#);
        let foundry = write_temp(r#"{"bytecode": {"object": "0x6080ff", "linkReferences": {}}}"#);
        let plain = write_temp("0x6080ff\n");
        for file in [&hardhat, &foundry, &plain] {
            assert_eq!(load_artifact(file.path()).unwrap().to_vec(), vec![0x60, 0x80, 0xff]);
        }
    }

    #[test]
    fn rejects_bad_artifacts() {
        let bad_hex = write_temp("0xnothex");
        assert!(matches!(load_artifact(bad_hex.path()), Err(ArtifactError::Hex(_))));
        let bad_json = write_temp(r#"{"abi": []}"#);
        assert!(matches!(load_artifact(bad_json.path()), Err(ArtifactError::Json(_))));
        assert!(matches!(
            load_artifact("/nonexistent/artifact.json"),
            Err(ArtifactError::Io(_))
        ));
    }
}
