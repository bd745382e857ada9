// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::U256;

use color::Color;

pub mod color;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Decodes a hex string, with or without a `0x` prefix and surrounding whitespace.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Pretty-prints an amount of wei as ETH.
pub fn format_eth(wei: U256) -> String {
    let Ok(gwei): Result<u64, _> = (wei / U256::from(1_000_000_000u64)).try_into() else {
        return "???".red();
    };
    let eth = gwei as f64 / 1e9;
    format!("{eth:.6} ETH")
}

/// Pretty-prints a gas amount with thousands separators.
pub fn format_gas(gas: u64) -> String {
    let digits = gas.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
